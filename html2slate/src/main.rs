use std::{
    env, fs,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
};

use slate_core::{Converter, ConverterConfig};

mod settings;

const USAGE: &str = "Usage: html2slate [--compact] [path_to_html | -]";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Accept optional input path: default to stdin
    let mut compact = false;
    let mut input_path: Option<String> = None;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--compact" => compact = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return ExitCode::SUCCESS;
            }
            _ if input_path.is_none() => input_path = Some(arg),
            _ => {
                eprintln!("{USAGE}");
                return ExitCode::FAILURE;
            }
        }
    }

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load settings: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let html = match read_input(input_path.as_deref()) {
        Ok(html) => html,
        Err(e) => {
            eprintln!("Failed to read input: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let value = match Converter::new(config).to_slate(&html) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Conversion failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let rendered = if compact {
        serde_json::to_string(&value)
    } else {
        serde_json::to_string_pretty(&value)
    };
    match rendered {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            ExitCode::FAILURE
        }
    }
}

// HTML2SLATE_CONFIG points at an explicit settings file; otherwise the
// per-user settings.toml is used when present.
fn load_config() -> Result<ConverterConfig, settings::SettingsError> {
    match env::var_os("HTML2SLATE_CONFIG") {
        Some(path) => {
            let path = PathBuf::from(path);
            log::info!("loading settings from {}", path.display());
            settings::load_from_path(&path)
        }
        None => settings::load(),
    }
}

fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        None | Some("-") => {
            let mut html = String::new();
            io::stdin().read_to_string(&mut html)?;
            Ok(html)
        }
        Some(path) => fs::read_to_string(path),
    }
}
