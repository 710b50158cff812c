use std::collections::HashMap;

/// Read access to environment variables.
///
/// Built once at the edge of the program and handed down explicitly, so nothing
/// below the entry point reads the process environment on its own.
pub trait Environment {
    fn var(&self, name: &str) -> Option<String>;

    /// Like [`Environment::var`], with empty values treated as unset.
    fn non_empty(&self, name: &str) -> Option<String> {
        self.var(name).filter(|value| !value.is_empty())
    }
}

/// The environment of the running process.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_should_skip_empty_values() {
        let environment = HashMap::from([
            ("EMPTY".to_owned(), String::new()),
            ("SET".to_owned(), "value".to_owned()),
        ]);

        assert_eq!(environment.var("EMPTY"), Some(String::new()));
        assert_eq!(environment.non_empty("EMPTY"), None);
        assert_eq!(environment.non_empty("SET"), Some("value".to_owned()));
        assert_eq!(environment.non_empty("UNSET"), None);
    }
}
