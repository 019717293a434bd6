//! Command implementations.

mod info;
mod send;
mod validate;

pub use info::run_info;
pub use send::run_send;
pub use validate::run_validate;

use std::path::{Path, PathBuf};

use contracts::SenderConfig;

/// Input path from the command line, falling back to the configuration
fn resolve_input(arg: Option<&Path>, config: &SenderConfig) -> PathBuf {
    arg.map(Path::to_path_buf)
        .unwrap_or_else(|| config.input.path.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_input_prefers_argument() {
        let config = SenderConfig::default();
        assert_eq!(
            resolve_input(Some(Path::new("other.csv")), &config),
            PathBuf::from("other.csv")
        );
        assert_eq!(resolve_input(None, &config), PathBuf::from("sms_list.csv"));
    }
}
