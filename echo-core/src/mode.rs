//! Invocation shapes a host can serve.

use std::fmt;
use std::str::FromStr;

/// Which event shape a host feeds to the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvocationMode {
    /// API Gateway proxy integration events
    #[default]
    Proxy,
    /// Plain request objects without the HTTP envelope
    NonProxy,
}

impl InvocationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvocationMode::Proxy => "proxy",
            InvocationMode::NonProxy => "non-proxy",
        }
    }
}

impl fmt::Display for InvocationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvocationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "proxy" => Ok(InvocationMode::Proxy),
            "non-proxy" | "nonproxy" | "non_proxy" => Ok(InvocationMode::NonProxy),
            other => Err(format!("Unknown invocation mode '{}', expected 'proxy' or 'non-proxy'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_spellings() {
        assert_eq!("proxy".parse::<InvocationMode>(), Ok(InvocationMode::Proxy));
        assert_eq!("Non-Proxy".parse::<InvocationMode>(), Ok(InvocationMode::NonProxy));
        assert_eq!("non_proxy".parse::<InvocationMode>(), Ok(InvocationMode::NonProxy));
    }

    #[test]
    fn rejects_unknown_modes() {
        let err = "websocket".parse::<InvocationMode>().unwrap_err();
        assert!(err.contains("websocket"));
    }

    #[test]
    fn display_round_trips() {
        for mode in [InvocationMode::Proxy, InvocationMode::NonProxy] {
            assert_eq!(mode.to_string().parse::<InvocationMode>(), Ok(mode));
        }
    }
}
