#[derive(Debug)]
pub struct BeginLoginDTO {
    pub return_to: Option<String>,
    pub callback_url: String,
}

#[derive(Debug)]
pub struct AuthorizationRedirectDTO {
    pub location: String,
}

#[derive(Debug)]
pub struct CompleteLoginDTO {
    pub state: Option<String>,
    pub code: Option<String>,
    pub error: Option<String>,
    pub callback_url: String,
}

#[derive(Debug)]
pub struct LoginCompletedDTO {
    pub session_id: String,
    pub return_to: String,
}

#[derive(Debug)]
pub struct SessionTokenDTO {
    pub token: String,
}
