use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// OAuth2 client id for the client-credentials grant. Never logged.
    pub client_id: String,
    /// OAuth2 client secret. Never logged.
    pub client_secret: String,
    pub token_url: String,
    pub base_url: String,
    /// Origins allowed by CORS, e.g. the deployed front-end plus localhost.
    pub allowed_origins: Vec<String>,
    /// Translation resource id requested for verse listings. Default: 131
    /// (Saheeh International English).
    pub translation_id: u32,
    pub verses_per_page: u32,
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    let client_id = std::env::var("CLIENT_ID")
        .map_err(|_| anyhow::anyhow!("CLIENT_ID is not set"))?;
    let client_secret = std::env::var("CLIENT_SECRET")
        .map_err(|_| anyhow::anyhow!("CLIENT_SECRET is not set"))?;

    Ok(Config {
        port: std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .unwrap_or(8000),
        client_id,
        client_secret,
        token_url: std::env::var("QURAN_TOKEN_URL").unwrap_or_else(|_| {
            "https://prelive-oauth2.quran.foundation/oauth2/token".into()
        }),
        base_url: std::env::var("QURAN_BASE_URL").unwrap_or_else(|_| {
            "https://apis-prelive.quran.foundation/content/api/v4".into()
        }),
        allowed_origins: std::env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        translation_id: std::env::var("TRANSLATION_ID")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(131),
        verses_per_page: std::env::var("VERSES_PER_PAGE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10),
    })
}
