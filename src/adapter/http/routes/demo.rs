use axum::Json;
use chrono::{Duration, Utc};
use rand::Rng;

use crate::adapter::http::schema::demo::WeatherForecast;

const SUMMARIES: [&str; 10] = [
    "Freezing",
    "Bracing",
    "Chilly",
    "Cool",
    "Mild",
    "Warm",
    "Balmy",
    "Hot",
    "Sweltering",
    "Scorching",
];

/// Demo data behind the dashboard; random five-day forecast.
#[utoipa::path(
    get,
    path = "/weatherforecast",
    tag = "Demo",
    responses(
        (status = 200, description = "Five-day demo forecast", body = [WeatherForecast])
    )
)]
pub async fn weather_forecast() -> Json<Vec<WeatherForecast>> {
    let mut rng = rand::rng();
    let today = Utc::now().date_naive();
    let forecast = (1..=5)
        .map(|offset| {
            let temperature_c = rng.random_range(-20..55);
            WeatherForecast {
                date: today + Duration::days(offset),
                temperature_c,
                temperature_f: 32 + (f64::from(temperature_c) / 0.5556) as i32,
                summary: SUMMARIES[rng.random_range(0..SUMMARIES.len())].to_string(),
            }
        })
        .collect();
    Json(forecast)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use rstest::rstest;
    use tower::ServiceExt;

    use crate::infra::app::create_app;
    use crate::tests::fixtures::{test_app_state, test_config};
    use crate::tests::helpers::{ada_claim, StubProvider};

    #[rstest]
    #[tokio::test]
    async fn test_weather_forecast_returns_five_days() {
        let config = test_config();
        let state = test_app_state(config.clone(), StubProvider::returning(ada_claim()));
        let app = create_app(&config, state);

        let request = Request::builder()
            .method("GET")
            .uri("/weatherforecast")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(status, StatusCode::OK);
        let days = json.as_array().expect("array expected");
        assert_eq!(days.len(), 5);
        for day in days {
            let celsius = day["temperature_c"].as_i64().expect("temperature expected");
            assert!((-20..55).contains(&celsius));
            assert!(day["summary"].is_string());
        }
    }
}
