use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;

use obal_client::capabilities::ClientCapabilities;
use obal_client::utils_generator::generate_utils_module;
use obal_syntax::write_module;
use obal_validator::diagnostics::{DiagnosticBus, sort_diagnostics};
use obal_validator::matcher::validate_service;
use obal_validator::model::{
    ContractModel, ServiceModel, contract_from_json, contract_from_yaml, service_from_json,
    service_from_yaml,
};

#[derive(Parser)]
#[command(name = "obal", about = "OpenAPI 3.x to Ballerina client tooling", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the client utility module for a capability fingerprint
    GenUtils {
        /// The generated client sends query parameters
        #[arg(long)]
        query_params: bool,

        /// The generated client sends custom headers
        #[arg(long)]
        headers: bool,

        /// The generated client sends URL-encoded request bodies
        #[arg(long)]
        form_urlencoded_body: bool,

        /// Output directory for utils.bal ("-" writes to stdout)
        #[arg(short, long, default_value = "generated")]
        output: String,
    },

    /// Validate a service implementation against an OpenAPI contract
    Validate {
        /// Reduced contract model (YAML or JSON)
        #[arg(long)]
        contract: PathBuf,

        /// Reduced service model (YAML or JSON)
        #[arg(long)]
        service: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::GenUtils {
            query_params,
            headers,
            form_urlencoded_body,
            output,
        } => cmd_gen_utils(query_params, headers, form_urlencoded_body, output),

        Commands::Validate { contract, service } => cmd_validate(contract, service),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "obal", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn cmd_gen_utils(
    query_params: bool,
    headers: bool,
    form_urlencoded_body: bool,
    output: String,
) -> Result<()> {
    let mut caps = ClientCapabilities::new();
    if query_params {
        caps.set_query_params_found(true)?;
    }
    if headers {
        caps.set_headers_found(true)?;
    }
    if form_urlencoded_body {
        caps.set_request_body_encoding_found(true)?;
    }

    let module = generate_utils_module(&caps)?;
    let source = write_module(&module);

    if output == "-" {
        print!("{source}");
        return Ok(());
    }

    let output_dir = PathBuf::from(output);
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;
    let path = output_dir.join("utils.bal");
    fs::write(&path, source).with_context(|| format!("failed to write {}", path.display()))?;
    eprintln!("  wrote {}", path.display());
    Ok(())
}

fn load_contract(path: &Path) -> Result<ContractModel> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");
    let contract = match ext {
        "json" => contract_from_json(&content)?,
        _ => contract_from_yaml(&content)?,
    };
    Ok(contract)
}

fn load_service(path: &Path) -> Result<ServiceModel> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");
    let service = match ext {
        "json" => service_from_json(&content)?,
        _ => service_from_yaml(&content)?,
    };
    Ok(service)
}

fn cmd_validate(contract_path: PathBuf, service_path: PathBuf) -> Result<()> {
    let contract = load_contract(&contract_path)?;
    let service = load_service(&service_path)?;

    let mut bus = DiagnosticBus::new();
    validate_service(&contract, &service, &mut bus);
    let has_errors = bus.has_errors();

    let mut diagnostics = bus.drain();
    sort_diagnostics(&mut diagnostics);
    for diagnostic in &diagnostics {
        println!("{diagnostic}");
    }

    eprintln!(
        "Validated {} operation(s): {} diagnostic(s)",
        contract.operations.len(),
        diagnostics.len()
    );

    if has_errors {
        std::process::exit(1);
    }
    Ok(())
}
