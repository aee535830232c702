use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub business_email: String,
    pub emailjs_service_id: String,
    pub emailjs_template_id: String,
    pub emailjs_public_key: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "salon.db".to_string()),
            business_email: env::var("BUSINESS_EMAIL")
                .unwrap_or_else(|_| "contact@yohihairbraiding.com".to_string()),
            emailjs_service_id: env::var("EMAILJS_SERVICE_ID").unwrap_or_default(),
            emailjs_template_id: env::var("EMAILJS_TEMPLATE_ID").unwrap_or_default(),
            emailjs_public_key: env::var("EMAILJS_PUBLIC_KEY").unwrap_or_default(),
        }
    }
}
