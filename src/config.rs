use clap::Args;

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// Character that introduces a flag token
    #[arg(long, default_value_t = '-')]
    pub marker: char,
}

impl Config {
    /// A flag token starts with the marker and has something after it, so a
    /// lone `-` stays positional.
    pub fn is_flag(&self, token: &str) -> bool {
        token.starts_with(self.marker) && token.len() > self.marker.len_utf8()
    }

    pub fn bare<'a>(&self, name: &'a str) -> &'a str {
        name.trim_start_matches(self.marker)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            marker: '-',
        }
    }
}
