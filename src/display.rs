use console::style;

/// Banner printed when an interactive session starts.
pub fn display_welcome(plugin_count: usize, ai_enabled: bool) {
    println!(
        "{} {}",
        style("Swabox").bold().cyan(),
        style(format!("v{} - AI-Enhanced Terminal", env!("CARGO_PKG_VERSION"))).dim()
    );

    let ai = if ai_enabled {
        style("AI on").green()
    } else {
        style("AI off").yellow()
    };
    println!(
        "{} plugin(s) loaded, {}. Type {} for commands, {} to leave.\n",
        plugin_count,
        ai,
        style("help").bold(),
        style("exit").bold()
    );
}

/// Prints a dispatch result, making sure it ends with a newline.
pub fn display_output(output: &str) {
    if output.is_empty() {
        return;
    }
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
}

/// Prints a front-end error (not a dispatch result) to stderr.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("error:").bold().red(), message);
}

pub fn display_goodbye() {
    println!("{}", style("Goodbye!").dim());
}
