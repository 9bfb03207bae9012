//! OAuth installed-app flow for the Drive client.
//!
//! First run: print the authorization URL, block reading the code from
//! stdin, exchange it for a token and cache it to [`TOKEN_CACHE_PATH`].
//! Later runs reuse the cached token as-is; there is no refresh or expiry
//! handling yet.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::TOKEN_CACHE_PATH;
use crate::error::AuthError;

const REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";
const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive.file";

/// The `installed` block of a Google API client secret file.
#[derive(Debug, Clone, Deserialize)]
pub struct InstalledSecret {
    pub client_id: String,
    pub client_secret: String,
    pub auth_uri: String,
    pub token_uri: String,
}

#[derive(Debug, Deserialize)]
struct ClientSecret {
    installed: InstalledSecret,
}

/// Cached OAuth token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: String,
}

impl Token {
    fn from_file(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        serde_json::from_reader(BufReader::new(file)).map_err(io::Error::other)
    }

    fn save(&self, path: &Path) -> io::Result<()> {
        let mut file = File::create(path)?;
        serde_json::to_writer(&mut file, self).map_err(io::Error::other)?;
        file.flush()
    }
}

/// Read and parse the client secret file.
pub fn read_client_secret(path: &Path) -> Result<InstalledSecret, AuthError> {
    let contents = std::fs::read(path).map_err(|source| AuthError::ReadSecret {
        path: path.to_path_buf(),
        source,
    })?;
    let secret: ClientSecret = serde_json::from_slice(&contents)?;
    Ok(secret.installed)
}

/// Obtain a token: cached if present, interactive web exchange otherwise.
pub async fn obtain_token(http: &Client, secret: &InstalledSecret) -> Result<Token, AuthError> {
    if let Ok(token) = Token::from_file(Path::new(TOKEN_CACHE_PATH)) {
        return Ok(token);
    }

    let token = token_from_web(http, secret).await?;
    token
        .save(Path::new(TOKEN_CACHE_PATH))
        .map_err(AuthError::CacheToken)?;
    Ok(token)
}

/// Print the authorization URL, read the code from stdin, and exchange it.
async fn token_from_web(http: &Client, secret: &InstalledSecret) -> Result<Token, AuthError> {
    let auth_url = Url::parse_with_params(
        &secret.auth_uri,
        &[
            ("access_type", "offline"),
            ("client_id", secret.client_id.as_str()),
            ("redirect_uri", REDIRECT_URI),
            ("response_type", "code"),
            ("scope", DRIVE_SCOPE),
        ],
    )?;

    println!("Go to the following link in your browser:\n{}", auth_url);
    print!("Enter the authorization code: ");
    io::stdout().flush().map_err(AuthError::ReadCode)?;

    let mut code = String::new();
    io::stdin()
        .read_line(&mut code)
        .map_err(AuthError::ReadCode)?;
    let code = code.trim();

    exchange_code(http, secret, code).await
}

/// Exchange an authorization code for a token at the token endpoint.
async fn exchange_code(
    http: &Client,
    secret: &InstalledSecret,
    code: &str,
) -> Result<Token, AuthError> {
    let response = http
        .post(&secret.token_uri)
        .form(&[
            ("code", code),
            ("client_id", secret.client_id.as_str()),
            ("client_secret", secret.client_secret.as_str()),
            ("redirect_uri", REDIRECT_URI),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AuthError::TokenRejected { status, body });
    }

    Ok(response.json::<Token>().await?)
}
