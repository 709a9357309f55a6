use colored::*;

use super::print;

const BANNER: &str = r#"
     ____  _____ ____ ___  _   _ ___ ____
    |  _ \| ____/ ___/ _ \| \ | |_ _/ ___|
    | |_) |  _|| |  | | | |  \| || | |
    |  _ <| |__| |__| |_| | |\  || | |___
    |_| \_\_____\____\___/|_| \_|___\____|
"#;

pub fn print() {
    print::print(&format!("{}", BANNER.bright_green().bold()));
}
