//! pxd - Command-line tool for compiling and rendering PixelDraw scripts

use std::process::ExitCode;

use pixeldraw::cli;

fn main() -> ExitCode {
    cli::run()
}
