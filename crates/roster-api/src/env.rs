//! `.env` loading.

/// Load `.env` from the working directory or its parents.
///
/// A missing file is not an error. Anything else (unreadable file, bad line)
/// is returned so the caller can log it once logging is up.
pub fn load_dotenv() -> Option<dotenvy::Error> {
    ignore_missing(dotenvy::dotenv())
}

fn ignore_missing<T>(result: Result<T, dotenvy::Error>) -> Option<dotenvy::Error> {
    match result {
        Ok(_) => None,
        Err(e) if e.not_found() => None,
        Err(e) => Some(e),
    }
}
