//! certify – command-line certificate generator.
//!
//! Usage:
//!   certify <request.json> [output.pdf] [--out-dir DIR]
//!   certify --sample <kind>
//!
//! The request file carries the organization profile, the practitioner
//! profile, and one certificate record (see `--sample` for the shape). If no
//! output path is given the PDF is written into the output directory
//! (`--out-dir`, the `CERT_FORGE_OUT_DIR` environment variable, or
//! `certificates/`) under the artifact's derived filename.

use std::{env, fs, path::PathBuf, process};

use cert_forge::model::RenderRequest;
use cert_forge::pipeline::{generate_certificate, PipelineConfig};
use cert_forge::samples;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut input_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut out_dir: Option<PathBuf> = None;
    let mut sample_kind: Option<String> = None;
    let mut positional = 0usize;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--out-dir" | "-d" => match iter.next() {
                Some(v) => out_dir = Some(PathBuf::from(v)),
                None => {
                    eprintln!("--out-dir requires a directory argument");
                    process::exit(1);
                }
            },
            "--sample" | "-s" => match iter.next() {
                Some(v) => sample_kind = Some(v.clone()),
                None => {
                    eprintln!("--sample requires a certificate kind");
                    process::exit(1);
                }
            },
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown flag: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
            path => {
                if positional == 0 {
                    input_path = Some(PathBuf::from(path));
                } else if positional == 1 {
                    output_path = Some(PathBuf::from(path));
                } else {
                    eprintln!("Unexpected argument: {path}");
                    print_usage(&args[0]);
                    process::exit(1);
                }
                positional += 1;
            }
        }
    }

    if let Some(kind) = sample_kind {
        print_sample(&kind);
        return;
    }

    let input = match input_path {
        Some(p) => p,
        None => {
            eprintln!("Error: no request file specified.");
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    let json = match fs::read_to_string(&input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading '{}': {e}", input.display());
            process::exit(1);
        }
    };

    let request: RenderRequest = match serde_json::from_str(&json) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error parsing '{}': {e}", input.display());
            process::exit(1);
        }
    };

    let artifact = match generate_certificate(
        &request.organization,
        &request.practitioner,
        &request.certificate,
        &PipelineConfig::default(),
    ) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error generating certificate: {e}");
            process::exit(1);
        }
    };

    let output = match output_path {
        Some(p) => p,
        None => {
            let dir = out_dir
                .or_else(|| env::var_os("CERT_FORGE_OUT_DIR").map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from("certificates"));
            if let Err(e) = fs::create_dir_all(&dir) {
                eprintln!("Error creating output directory '{}': {e}", dir.display());
                process::exit(1);
            }
            available_path(dir.join(&artifact.filename))
        }
    };

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!("Error creating output directory: {e}");
                process::exit(1);
            }
        }
    }
    if let Err(e) = fs::write(&output, &artifact.bytes) {
        eprintln!("Error writing '{}': {e}", output.display());
        process::exit(1);
    }
    eprintln!(
        "Wrote '{}' ({} bytes)",
        output.display(),
        artifact.bytes.len()
    );
}

/// Resolve filename collisions (same subject, same second) by appending
/// `-2`, `-3`, ... before the extension instead of overwriting.
fn available_path(path: PathBuf) -> PathBuf {
    if !path.exists() {
        return path;
    }
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("certificate")
        .to_string();
    let parent = path.parent().map(PathBuf::from).unwrap_or_default();
    let mut n = 2;
    loop {
        let candidate = parent.join(format!("{stem}-{n}.pdf"));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

fn print_sample(kind: &str) {
    let certificate = match kind {
        "general_medical" | "medical" => samples::sample_general_medical(),
        "fitness" => samples::sample_fitness(),
        "sick_leave" => samples::sample_sick_leave(),
        "driving_fitness" | "form_1a" => samples::sample_driving_fitness(),
        other => {
            eprintln!(
                "Unknown kind '{other}'. \
                 Use: general_medical | fitness | sick_leave | driving_fitness"
            );
            process::exit(1);
        }
    };
    let request = samples::sample_render_request(certificate);
    match serde_json::to_string_pretty(&request) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serialising sample: {e}");
            process::exit(1);
        }
    }
}

fn print_usage(prog: &str) {
    eprintln!("certify – certificate to PDF generator (cert-forge)");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} <request.json> [output.pdf] [--out-dir DIR]");
    eprintln!("  {prog} --sample <kind>");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <request.json>  JSON file with organization, practitioner, and certificate");
    eprintln!("  [output.pdf]    Output path (default: out dir + derived filename)");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --out-dir, -d   Output directory (default: CERT_FORGE_OUT_DIR or certificates/)");
    eprintln!("  --sample, -s    Print a sample request JSON for a kind and exit");
    eprintln!("                  (general_medical | fitness | sick_leave | driving_fitness)");
    eprintln!("  --help          Print this message");
}
