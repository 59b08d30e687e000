use serde::de::DeserializeOwned;
use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

/// Read a JSON request from `--input <file>`, or from stdin when data is
/// piped in. `Ok(None)` means neither source supplied anything.
pub fn read_request<T: DeserializeOwned>(path: Option<&str>) -> Result<Option<T>, Box<dyn Error>> {
    let (source, contents) = match path {
        Some(path) => {
            let file = resolve_path(path)?;
            let contents = fs::read_to_string(&file)
                .map_err(|e| format!("Failed to read '{}': {}", file.display(), e))?;
            (file.display().to_string(), contents)
        }
        None => match read_piped_stdin()? {
            Some(contents) => ("stdin".to_string(), contents),
            None => return Ok(None),
        },
    };

    let request = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", source, e))?;
    Ok(Some(request))
}

/// Stdin contents, or None on an interactive terminal or empty pipe.
fn read_piped_stdin() -> Result<Option<String>, Box<dyn Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(Some(trimmed.to_string()))
}

fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn Error>> {
    let p = PathBuf::from(path);
    let resolved = if p.is_absolute() {
        p
    } else {
        std::env::current_dir()?.join(p)
    };

    if !resolved.is_file() {
        return Err(format!("Input file not found: {}", resolved.display()).into());
    }
    Ok(resolved)
}
