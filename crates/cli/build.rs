use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("kindler")
        .version("0.1.0")
        .author("Kindler Contributors")
        .about("Send web articles to a Kindle as EPUB")
        .arg(
            clap::arg!(--workdir <DIR> "Working directory for downloaded pages and books")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds"))
        .arg(clap::arg!(--pandoc <PROGRAM> "Converter executable"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"))
        .subcommand(
            clap::Command::new("send")
                .about("Fetch an article, convert it to EPUB and mail it")
                .arg(clap::arg!(<URL> "Article URL")),
        )
        .subcommand(clap::Command::new("cleanup").about("Delete every file in the working directory"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "kindler", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "kindler", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "kindler", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
