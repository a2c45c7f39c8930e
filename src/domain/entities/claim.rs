/// Identity attributes attested by the external provider.
///
/// Read-only input to session creation; never persisted outside a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaim {
    pub name: String,
    pub email: String,
    pub picture: Option<String>,
}
