/// Global, per-invocation settings shared by every command.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Hides the banner at startup.
    pub no_banner: bool,
    /// 0 prints everything, 1 hides decorations, 2 prints results only.
    pub quiet: u8,
    /// Disables the keyboard listener (`q` to finish early).
    pub disable_input: bool,
    /// Prints the final reports as JSON on stdout.
    pub json: bool,
    /// Raises the log level (`-v` debug, `-vv` trace).
    pub verbose: u8,
}
