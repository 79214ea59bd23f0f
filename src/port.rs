pub const DEFAULT_PORT: u16 = 8080;

/// Lowest port that doesn't require elevated privileges.
const MIN_PORT: u16 = 1024;

/// Pick the listening port from the positional arguments.
///
/// Exactly one argument that parses as a port in the unprivileged range is
/// honored; anything else falls back to the default without complaint.
pub fn resolve(args: &[String]) -> u16 {
    match args {
        [port] => port
            .parse::<u16>()
            .ok()
            .filter(|&port| port >= MIN_PORT)
            .unwrap_or(DEFAULT_PORT),
        _ => DEFAULT_PORT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve_args(args: &[&str]) -> u16 {
        let args = args.iter().map(|arg| arg.to_string()).collect::<Vec<_>>();
        resolve(&args)
    }

    #[test]
    fn in_range_ports_are_honored() {
        assert_eq!(resolve_args(&["1024"]), 1024);
        assert_eq!(resolve_args(&["3000"]), 3000);
        assert_eq!(resolve_args(&["65535"]), 65535);
    }

    #[test]
    fn out_of_range_ports_fall_back() {
        assert_eq!(resolve_args(&["0"]), DEFAULT_PORT);
        assert_eq!(resolve_args(&["1023"]), DEFAULT_PORT);
        assert_eq!(resolve_args(&["65536"]), DEFAULT_PORT);
        assert_eq!(resolve_args(&["-80"]), DEFAULT_PORT);
    }

    #[test]
    fn unparseable_ports_fall_back() {
        assert_eq!(resolve_args(&["port"]), DEFAULT_PORT);
        assert_eq!(resolve_args(&["80.0"]), DEFAULT_PORT);
        assert_eq!(resolve_args(&[""]), DEFAULT_PORT);
    }

    #[test]
    fn missing_or_extra_arguments_fall_back() {
        assert_eq!(resolve_args(&[]), DEFAULT_PORT);
        assert_eq!(resolve_args(&["3000", "4000"]), DEFAULT_PORT);
    }
}
