use crate::CLAP_STYLING;
use clap::{arg, command};
use url::Url;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("mindgen")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("mindgen")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("serve")
                .about("Serve the mind-map generator over HTTP")
                .arg(
                    arg!(--"host" <HOST>)
                        .required(false)
                        .help("Address to bind")
                        .default_value("0.0.0.0"),
                )
                .arg(
                    arg!(-p --"port" <PORT>)
                        .required(false)
                        .help("Port to listen on")
                        .value_parser(clap::value_parser!(u16))
                        .default_value("8000"),
                )
                .arg(
                    arg!(--"delay-ms" <MILLIS>)
                        .required(false)
                        .help("Artificial delay before each generation, in milliseconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("1000"),
                )
                .arg(
                    arg!(-c --"corpus" <PATH>)
                        .required(false)
                        .help("JSON topic corpus to use instead of the built-in one"),
                ),
        )
        .subcommand(
            command!("generate")
                .about("Generate a mind map for a keyword and print it as an outline")
                .arg(
                    arg!(<KEYWORD>)
                        .required(true)
                        .help("The topic to expand"),
                )
                .arg(
                    arg!(-d --"depth" <DEPTH>)
                        .required(false)
                        .help("Levels below the root (clamped to 1-4, default 2)")
                        .value_parser(clap::value_parser!(i64)),
                )
                .arg(
                    arg!(-m --"max-nodes" <NUM_NODES>)
                        .required(false)
                        .help("Maximum nodes per level (clamped to 3-8, default 5)")
                        .value_parser(clap::value_parser!(i64)),
                )
                .arg(
                    arg!(--"no-links")
                        .required(false)
                        .help("Do not annotate nodes with reference URLs")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Outline format: text, json, markdown, mermaid")
                        .value_parser(["text", "json", "markdown", "md", "mermaid"])
                        .default_value("text"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save outline to file (default: display to screen)"),
                )
                .arg(
                    arg!(--"seed" <SEED>)
                        .required(false)
                        .help("Seed the generator for a reproducible outline")
                        .value_parser(clap::value_parser!(u64))
                        .conflicts_with("remote"),
                )
                .arg(
                    arg!(-r --"remote" <URL>)
                        .required(false)
                        .help("Ask a running mindgen service, falling back to local generation")
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(-c --"corpus" <PATH>)
                        .required(false)
                        .help("JSON topic corpus to use instead of the built-in one"),
                ),
        )
        .subcommand(
            command!("topics")
                .about("List the known topics and their categories")
                .arg(
                    arg!(-c --"corpus" <PATH>)
                        .required(false)
                        .help("JSON topic corpus to use instead of the built-in one"),
                ),
        )
}
