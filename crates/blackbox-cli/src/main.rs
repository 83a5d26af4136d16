//! bbctl - Blackbox report decoder CLI
//!
//! Host-side companion to the on-target fault-capture core: takes a
//! persisted report image (read out of the reserved flash slot) or a
//! captured console hex dump, and reconstructs the fault record and the
//! trace log, optionally as JSON for scripting.

#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blackbox_decoder::{
    DecodedReport, IdTable, TraceDecode, decode_report, decode_trace, parse_hex_dump,
};

#[derive(Parser)]
#[command(name = "bbctl")]
#[command(about = "Decode Blackbox fault reports and trace captures")]
#[command(version)]
struct Cli {
    /// Output in JSON format for machine parsing
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a report: fault record, trace capture, and (with an id
    /// table) the reconstructed trace records
    Decode(DecodeArgs),

    /// Decode only the trace records from a report (requires --ids)
    Trace(DecodeArgs),

    /// Validate an identifier-table JSON file
    CheckIds {
        /// Path to the id table (JSON, id number to name/arg widths)
        ids: PathBuf,
    },
}

#[derive(Args)]
struct DecodeArgs {
    /// Raw report image read from the reserved storage slot
    #[arg(long, conflicts_with = "hex")]
    image: Option<PathBuf>,

    /// Console log containing the panic-time hex echo
    #[arg(long)]
    hex: Option<PathBuf>,

    /// Identifier table (JSON); enables trace record reconstruction
    #[arg(long)]
    ids: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("bbctl={log_level},blackbox_decoder={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Decode(args) => decode(&args, cli.json),
        Commands::Trace(args) => trace_only(&args, cli.json),
        Commands::CheckIds { ids } => check_ids(&ids, cli.json),
    }
}

fn decode(args: &DecodeArgs, json: bool) -> Result<()> {
    let image = load_image(args)?;
    info!(bytes = image.len(), "image loaded");

    let report = decode_report(&image).context("report image did not parse")?;
    let trace = match &args.ids {
        Some(path) => Some(decode_trace(&load_ids(path)?, &report.trace)),
        None => None,
    };

    if json {
        print_json(&report, trace.as_ref())?;
    } else {
        print_human(&report, trace.as_ref());
    }
    Ok(())
}

fn trace_only(args: &DecodeArgs, json: bool) -> Result<()> {
    let Some(ids) = &args.ids else {
        bail!("trace decoding needs an identifier table; pass --ids");
    };
    let image = load_image(args)?;
    let report = decode_report(&image).context("report image did not parse")?;
    let trace = decode_trace(&load_ids(ids)?, &report.trace);

    if json {
        println!("{}", serde_json::to_string_pretty(&trace)?);
        return Ok(());
    }
    println!(
        "{} records from offset {}, {} unknown bytes, {} padding bytes",
        trace.records.len(),
        trace.start_offset,
        trace.unknown_bytes,
        trace.padding_bytes
    );
    for record in &trace.records {
        let args: Vec<String> = record.args.iter().map(|a| format!("{a:#x}")).collect();
        println!("{:#04x} {} [{}]", record.id, record.name, args.join(", "));
    }
    Ok(())
}

fn load_image(args: &DecodeArgs) -> Result<Vec<u8>> {
    match (&args.image, &args.hex) {
        (Some(path), None) => {
            fs::read(path).with_context(|| format!("reading image {}", path.display()))
        }
        (None, Some(path)) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading hex dump {}", path.display()))?;
            Ok(parse_hex_dump(&text)?)
        }
        _ => bail!("exactly one of --image or --hex is required"),
    }
}

fn load_ids(path: &PathBuf) -> Result<IdTable> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading id table {}", path.display()))?;
    let table: IdTable = serde_json::from_str(&text)
        .with_context(|| format!("parsing id table {}", path.display()))?;
    table.validate()?;
    Ok(table)
}

fn check_ids(path: &PathBuf, json: bool) -> Result<()> {
    let table = load_ids(path)?;
    if json {
        println!("{}", json!({ "ok": true, "max_record_bytes": table.max_record_bytes() }));
    } else {
        println!(
            "ok: longest possible record is {} bytes",
            table.max_record_bytes()
        );
    }
    Ok(())
}

fn print_json(report: &DecodedReport, trace: Option<&TraceDecode>) -> Result<()> {
    let value = json!({
        "report": report,
        "trace_records": trace,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn print_human(report: &DecodedReport, trace: Option<&TraceDecode>) {
    let fault = &report.fault;
    println!("byte order : {:?}", report.byte_order);
    println!("class      : {}", fault.class);
    println!("param      : {:#010x}", fault.param);
    println!("uptime     : {} ms", fault.uptime_ms);
    println!("return addr: {:#010x}", fault.return_addr);
    println!("sp / lr    : {:#010x} / {:#010x}", fault.sp, fault.lr);
    println!(
        "frame      : r0={:#010x} r1={:#010x} r2={:#010x} r3={:#010x} r12={:#010x}",
        fault.frame_regs[0],
        fault.frame_regs[1],
        fault.frame_regs[2],
        fault.frame_regs[3],
        fault.frame_regs[4]
    );
    let [ipsr, icsr, shcsr, cfsr, hfsr, mmfar, bfar] = fault.system_regs;
    println!("ipsr/icsr  : {ipsr:#010x} / {icsr:#010x}");
    println!("shcsr      : {shcsr:#010x}");
    println!("cfsr/hfsr  : {cfsr:#010x} / {hfsr:#010x}");
    println!("mmfar/bfar : {mmfar:#010x} / {bfar:#010x}");
    println!(
        "trace      : {} bytes captured, cursor {}",
        report.trace.bytes.len(),
        report.trace.cursor
    );

    let Some(trace) = trace else {
        println!("(pass --ids to reconstruct trace records)");
        return;
    };
    println!(
        "records    : {} decoded, start offset {}, {} unknown bytes",
        trace.records.len(),
        trace.start_offset,
        trace.unknown_bytes
    );
    for record in &trace.records {
        let args: Vec<String> = record.args.iter().map(|a| format!("{a:#x}")).collect();
        println!("  {:#04x} {} [{}]", record.id, record.name, args.join(", "));
    }
}
