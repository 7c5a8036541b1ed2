use std::env::{self, VarError};
use std::fs;

use anyhow::{anyhow, Context, Result};
use glam::Vec4;
use log::info;

use material_library::{Codepage, LossyText, MaterialLibrary, MtlDecoder, MtlEncoder};

const CODEPAGE_ENV: &str = "MTL_CODEPAGE";

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = CliOptions::parse(env::args().skip(1))?;
    let data =
        fs::read(&options.path).with_context(|| format!("unable to read {}", options.path))?;
    info!("read {} bytes from {}", data.len(), options.path);

    let decoder = MtlDecoder::new(options.codepage);
    let library = if options.lossy {
        decoder.with_text_decoder(LossyText).decode(&data)
    } else {
        decoder.decode(&data)
    }
    .with_context(|| format!("failed to decode material library {}", options.path))?;

    print_summary(&library, options.codepage);

    if let Some(out) = &options.rewrite {
        let bytes = MtlEncoder::new(options.codepage)
            .encode(&library)
            .context("failed to encode material library")?;
        fs::write(out, &bytes).with_context(|| format!("unable to write {out}"))?;
        println!("Wrote {} material(s) to {out}", library.len());
    }

    Ok(())
}

fn print_summary(library: &MaterialLibrary, codepage: Codepage) {
    println!("Loaded {} material(s) using {codepage}", library.len());
    for (index, material) in library.iter().enumerate() {
        let textures = if material.texture_file_names.is_empty() {
            "<none>".to_string()
        } else {
            material.texture_file_names.join(", ")
        };
        println!(
            " - [{index}] diffuse={} power={:.2} textures: {textures}",
            format_color(material.diffuse),
            material.specular_power
        );
    }
}

fn format_color(color: Vec4) -> String {
    format!(
        "({:.2}, {:.2}, {:.2}, {:.2})",
        color.x, color.y, color.z, color.w
    )
}

#[derive(Debug)]
struct CliOptions {
    path: String,
    codepage: Codepage,
    lossy: bool,
    rewrite: Option<String>,
}

impl CliOptions {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let Some(path) = args.next() else {
            return Err(anyhow!(
                "Usage: mtl-inspect <file.mtl> [--codepage <id|name>] [--lossy] [--rewrite <out.mtl>]"
            ));
        };

        let mut codepage = match env::var(CODEPAGE_ENV) {
            Ok(value) => value
                .parse::<Codepage>()
                .with_context(|| format!("invalid {CODEPAGE_ENV} value {value:?}"))?,
            Err(VarError::NotPresent) => Codepage::default(),
            Err(err) => {
                return Err(err).with_context(|| format!("invalid {CODEPAGE_ENV} value"));
            }
        };
        let mut lossy = false;
        let mut rewrite = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--codepage" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("--codepage expects a value"))?;
                    codepage = value
                        .parse::<Codepage>()
                        .with_context(|| format!("invalid --codepage value {value:?}"))?;
                }
                "--lossy" => lossy = true,
                "--rewrite" => {
                    rewrite = Some(
                        args.next()
                            .ok_or_else(|| anyhow!("--rewrite expects an output path"))?,
                    );
                }
                other => {
                    return Err(anyhow!(
                        "Unknown argument: {other}. Expected --codepage, --lossy or --rewrite"
                    ));
                }
            }
        }

        Ok(Self {
            path,
            codepage,
            lossy,
            rewrite,
        })
    }
}
