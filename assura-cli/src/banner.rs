use console::Style;

const BANNER: &str = r#"
  █████╗ ███████╗███████╗██╗   ██╗██████╗  █████╗
 ██╔══██╗██╔════╝██╔════╝██║   ██║██╔══██╗██╔══██╗
 ███████║███████╗███████╗██║   ██║██████╔╝███████║
 ██╔══██║╚════██║╚════██║██║   ██║██╔══██╗██╔══██║
 ██║  ██║███████║███████║╚██████╔╝██║  ██║██║  ██║
 ╚═╝  ╚═╝╚══════╝╚══════╝ ╚═════╝ ╚═╝  ╚═╝╚═╝  ╚═╝"#;

/// Print the console banner with version and mode.
pub fn print_banner(mode: &str) {
    let teal = Style::new().cyan().bold();
    let dim = Style::new().dim();

    println!("{}", teal.apply_to(BANNER));
    println!(
        "  {}",
        dim.apply_to(format!(
            "v{} · on-chain insurance desk · {} mode",
            env!("CARGO_PKG_VERSION"),
            mode
        ))
    );
    println!();
}
