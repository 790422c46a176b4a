//! First-run prompt used when neither a config file nor the backend URL
//! environment variable is available.

use crate::error::AppError;
use tokio::io::{self, AsyncBufReadExt};

/// Prompts the user for the season backend URL and returns the trimmed input.
///
/// # Example
/// ```no_run
/// use club_standings::config::user_prompts::prompt_for_backend_url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend_url = prompt_for_backend_url().await?;
/// println!("Using backend: {}", backend_url);
/// # Ok(())
/// # }
/// ```
pub async fn prompt_for_backend_url() -> Result<String, AppError> {
    println!("Please enter the URL of the season backend: ");
    let mut input = String::new();
    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin);
    reader.read_line(&mut input).await?;
    Ok(input.trim().to_string())
}
