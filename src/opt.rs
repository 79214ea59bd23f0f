use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Options {
    /// Logging verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Port to listen on (1024-65535; anything else falls back to 8080)
    ///
    /// Kept as raw strings: an unparseable or out-of-range value must fall
    /// back to the default silently instead of failing argument parsing.
    #[arg(value_name = "PORT")]
    pub args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Options::command().debug_assert();
    }

    #[test]
    fn positional_values_are_collected_raw() {
        let options = Options::try_parse_from(["served", "not-a-port"]).unwrap();
        assert_eq!(options.args, ["not-a-port"]);

        let options = Options::try_parse_from(["served", "3000", "4000"]).unwrap();
        assert_eq!(options.args, ["3000", "4000"]);
    }
}
