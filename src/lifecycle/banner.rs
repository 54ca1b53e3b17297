//! Version identification and the startup banner.

/// Version of the running node.
#[derive(Debug, Clone, PartialEq)]
pub struct Version {
    identifier: &'static str,
    build_timestamp: &'static str,
}

impl Version {
    /// The version this binary was built as. The build timestamp is taken from
    /// `LOADTEST_BUILD_TIMESTAMP` at compile time.
    pub fn current() -> Self {
        Self {
            identifier: env!("CARGO_PKG_VERSION"),
            build_timestamp: option_env!("LOADTEST_BUILD_TIMESTAMP").unwrap_or("unknown"),
        }
    }

    pub fn identifier(&self) -> &str {
        self.identifier
    }

    pub fn build_timestamp(&self) -> &str {
        self.build_timestamp
    }
}

/// Renders the banner logged once the node has started.
pub fn render_banner(node_name: &str, version: &Version) -> String {
    let runtime = match tokio::runtime::Handle::try_current() {
        Ok(handle) => format!("Tokio ({:?})", handle.runtime_flavor()),
        Err(_) => "none".to_string(),
    };
    let lines = [
        node_name.to_string(),
        String::new(),
        format!("Version: {}.{}", version.identifier(), version.build_timestamp()),
        format!(
            "Operating System: {} ({})",
            std::env::consts::OS,
            std::env::consts::ARCH
        ),
        format!("Runtime: {}", runtime),
    ];
    boxed(&lines, '*')
}

/// Frames `lines` in a box drawn with `border`.
pub fn boxed(lines: &[String], border: char) -> String {
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let edge: String = std::iter::repeat(border).take(width + 4).collect();

    let mut out = String::new();
    out.push_str(&edge);
    for line in lines {
        out.push('\n');
        out.push_str(&format!("{} {:<width$} {}", border, line, border, width = width));
    }
    out.push('\n');
    out.push_str(&edge);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxed_pads_every_line_to_the_widest() {
        let text = boxed(&["abc".to_string(), "a".to_string()], '*');

        assert_eq!(text, "*******\n* abc *\n* a   *\n*******");
    }

    #[tokio::test]
    async fn test_banner_contains_version_and_runtime() {
        let version = Version::current();

        let banner = render_banner("Load Test Node", &version);

        assert!(banner.contains("* Load Test Node"));
        assert!(banner.contains(&format!("Version: {}.", env!("CARGO_PKG_VERSION"))));
        assert!(banner.contains("Operating System: "));
        assert!(banner.contains("Runtime: Tokio"));
    }
}
