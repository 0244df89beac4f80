#[macro_use]
extern crate log;

mod app;

use api::*;
use app::*;
use clap::Parser;
use diagram::DiagramConfig;
use shader::read_template;
use std::io::{self, Write};
use std::path::PathBuf;

fn main() {
    // Initialize `env_logger`.
    env_logger::init();

    let options = Options::parse();
    if let Err(e) = run(options.command) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), ApiError> {
    match command {
        Command::Diagrams {
            lenses,
            out,
            size,
            supersample,
        } => {
            let registry = Registry::load(&lenses)?;
            let config = DiagramConfig {
                size,
                supersample,
                ..DiagramConfig::default()
            };
            for path in build_diagrams(&registry, &config, &out)? {
                println!("  {}", path.display());
            }
        }

        Command::Shader {
            lenses,
            template,
            out,
        } => {
            let registry = Registry::load(&lenses)?;
            let template = read_template(&template)?;
            let source = build_shader(&registry, &template, None)?;
            match out {
                Some(path) => write_output(&path, &source)?,
                None => print_stdout(&source)?,
            }
        }

        Command::Trace {
            lenses,
            lens,
            height,
        } => {
            let registry = Registry::load(&lenses)?;
            match trace_ray(&registry, &lens, height)? {
                Ok(path) => {
                    for p in path.polyline() {
                        println!("{:.6} {:.6}", p.x, p.y);
                    }
                    let d = path.exit_direction();
                    println!("exit direction {:.6} {:.6}", d.x, d.y);
                }
                Err(failure) => println!("{failure}"),
            }
        }

        Command::Check { lenses } => {
            let registry = Registry::load(&lenses)?;
            for (i, choice) in LensChoices::from_registry(&registry).items().iter().enumerate() {
                let lens = registry.lens(i);
                println!(
                    "{i:>3}  {:<24} {:<28} {:>2} surfaces, stop {}",
                    choice.id,
                    choice.name,
                    lens.surfaces().len(),
                    lens.stop_index()
                );
            }
        }
    }
    Ok(())
}

/// Write generated text to standard output.
fn print_stdout(contents: &str) -> Result<(), ApiError> {
    io::stdout()
        .lock()
        .write_all(contents.as_bytes())
        .map_err(|source| ApiError::Write {
            path: PathBuf::from("<stdout>"),
            source,
        })
}
