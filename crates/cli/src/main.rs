//
// Copyright (c) 2025 TRUSTEDGE LABS LLC
// This source code is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Project: cipherforge — Classic and modern primitives behind one streaming contract.
//

//! Demo shell over the cipherforge registry: list and inspect algorithms,
//! run one streaming pass, or drive the declared-vector harness.

mod report;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use cipherforge_core::metadata::Category;
use cipherforge_core::vectors::{run_algorithm, run_all};
use cipherforge_core::{catalog, ops, registry, Algorithm, Instance, InstanceError};

use report::{print_algorithm_report, print_harness_summary, ExitCode};

#[derive(Parser, Debug)]
#[command(author, version, about = "cipherforge algorithm shell", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered algorithms
    List(ListCmd),
    /// Show one algorithm's metadata and declared vectors
    Info(InfoCmd),
    /// Feed input to one algorithm and print the result
    Run(RunCmd),
    /// Run declared test vectors
    Test(TestCmd),
}

#[derive(Args, Debug)]
struct ListCmd {
    #[arg(long, value_name = "CATEGORY", help = "Only list one category")]
    category: Option<Category>,
    #[arg(long, help = "Output as JSON")]
    json: bool,
}

#[derive(Args, Debug)]
struct InfoCmd {
    #[arg(value_name = "NAME")]
    name: String,
    #[arg(long, help = "Output as JSON")]
    json: bool,
}

#[derive(Args, Debug)]
struct RunCmd {
    #[arg(value_name = "NAME")]
    name: String,
    #[arg(long, value_name = "HEX", help = "Key bytes as hex")]
    key: Option<String>,
    #[arg(long, value_name = "HEX", help = "IV/nonce bytes as hex")]
    iv: Option<String>,
    #[arg(long = "in", value_name = "TEXT", help = "Input as ASCII text")]
    input: Option<String>,
    #[arg(long = "in-hex", value_name = "HEX", help = "Input as hex", conflicts_with = "input")]
    input_hex: Option<String>,
    #[arg(long, value_name = "BYTES", help = "Requested output size")]
    output_size: Option<usize>,
    #[arg(long, help = "Print the result as lowercase hex instead of raw bytes")]
    out_hex: bool,
    #[arg(long, help = "Run the inverse (decrypt/verify) direction")]
    inverse: bool,
}

#[derive(Args, Debug)]
struct TestCmd {
    #[arg(value_name = "NAME", help = "Only test one algorithm")]
    name: Option<String>,
    #[arg(long, help = "Output as JSON")]
    json: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::List(args) => handle_list(args),
        Commands::Info(args) => handle_info(args),
        Commands::Run(args) => handle_run(args),
        Commands::Test(args) => handle_test(args),
    }
}

fn handle_list(args: ListCmd) -> Result<()> {
    let reg = registry::shared();
    let summaries: Vec<_> = catalog::list_algorithms(reg)
        .into_iter()
        .filter(|s| args.category.map_or(true, |c| s.category == c))
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    for s in &summaries {
        println!(
            "● {:<14} {:<14} {:<10} {} vectors",
            s.name, s.category, s.security_status, s.vector_count
        );
    }
    println!("{} algorithms", summaries.len());
    Ok(())
}

fn handle_info(args: InfoCmd) -> Result<()> {
    let reg = registry::shared();
    let Some(algorithm) = reg.find(&args.name) else {
        eprintln!("✖ unknown algorithm: {}", args.name);
        ExitCode::UnknownAlgorithm.exit();
    };
    let descriptor = algorithm.descriptor();

    if args.json {
        let summary = cipherforge_core::AlgorithmSummary::from(descriptor);
        let vectors: Vec<catalog::VectorSummary> = catalog::vectors(reg, &args.name)
            .map(|declared| declared.iter().map(catalog::VectorSummary::from).collect())
            .unwrap_or_default();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "algorithm": summary,
                "vectors": vectors,
            }))?
        );
        return Ok(());
    }

    println!("● {} ({})", descriptor.name, descriptor.internal_name);
    println!("  category:  {} / {}", descriptor.category, descriptor.sub_category);
    println!(
        "  origin:    {} ({}, {})",
        descriptor.inventor, descriptor.country, descriptor.year
    );
    println!("  status:    {}", descriptor.security_status);
    println!("  level:     {}", descriptor.complexity);
    println!("  {}", descriptor.description);
    for link in &descriptor.documentation {
        println!("  doc: {} <{}>", link.text, link.uri);
    }
    for vuln in &descriptor.vulnerabilities {
        println!("  ⚠ {}: {}", vuln.kind, vuln.description);
    }
    println!("  {} declared vectors", descriptor.vectors.len());
    Ok(())
}

fn decode_hex_arg(name: &'static str, value: &str) -> Result<Vec<u8>, InstanceError> {
    ops::hex_to_bytes(value).map_err(|e| InstanceError::InvalidParameter {
        name,
        reason: e.to_string(),
    })
}

fn handle_run(args: RunCmd) -> Result<()> {
    let reg = registry::shared();
    let Some(algorithm) = reg.find(&args.name) else {
        eprintln!("✖ unknown algorithm: {}", args.name);
        ExitCode::UnknownAlgorithm.exit();
    };

    let Some(mut instance) = algorithm.create_instance(args.inverse) else {
        eprintln!("✖ {} has no inverse direction", algorithm.name());
        ExitCode::InvalidParameter.exit();
    };

    let configured = (|| -> Result<Vec<u8>, InstanceError> {
        if let Some(key) = &args.key {
            instance.set_key(&decode_hex_arg("key", key)?)?;
        }
        if let Some(iv) = &args.iv {
            instance.set_iv(&decode_hex_arg("iv", iv)?)?;
        }
        if let Some(size) = args.output_size {
            instance.set_output_size(size)?;
        }
        let input = match (&args.input, &args.input_hex) {
            (Some(text), _) => text.as_bytes().to_vec(),
            (None, Some(hex_input)) => decode_hex_arg("in-hex", hex_input)?,
            (None, None) => Vec::new(),
        };
        instance.feed(&input)?;
        instance.result()
    })();

    match configured {
        Ok(output) => {
            if args.out_hex {
                println!("{}", ops::bytes_to_hex(&output));
            } else {
                io::stdout()
                    .write_all(&output)
                    .context("writing result to stdout")?;
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("✖ {err}");
            ExitCode::InvalidParameter.exit();
        }
    }
}

fn handle_test(args: TestCmd) -> Result<()> {
    let reg = registry::shared();

    if let Some(name) = &args.name {
        let Some(algorithm) = reg.find(name) else {
            eprintln!("✖ unknown algorithm: {name}");
            ExitCode::UnknownAlgorithm.exit();
        };
        let report = run_algorithm(algorithm.as_ref());
        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_algorithm_report(&report);
        }
        if !report.all_passed() {
            ExitCode::VectorMismatch.exit();
        }
        return Ok(());
    }

    let report = run_all(reg);
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serializing harness report")?
        );
    } else {
        for algorithm_report in &report.reports {
            print_algorithm_report(algorithm_report);
        }
        print_harness_summary(&report);
    }
    if !report.all_passed() {
        ExitCode::VectorMismatch.exit();
    }
    Ok(())
}
