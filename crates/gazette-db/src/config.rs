use std::env;
use std::path::PathBuf;

/// Database location from `GAZETTE_DB_PATH`, defaulting to `gazette.db`
/// in the working directory. Loads `.env` first if one is present.
pub fn db_path_from_env() -> PathBuf {
    let _ = dotenvy::dotenv();

    PathBuf::from(env::var("GAZETTE_DB_PATH").unwrap_or_else(|_| "gazette.db".into()))
}
