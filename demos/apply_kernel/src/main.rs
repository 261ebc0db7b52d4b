use argh::FromArgs;
use std::path::{Path, PathBuf};

use pixconv::{
    image::{Image, ImageSize},
    imgproc::{
        filter::{convolve_with, KernelPreset},
        parallel::ExecutionStrategy,
    },
};

#[derive(FromArgs)]
/// Apply a preset convolution kernel to a raw interleaved 8-bit image
struct Args {
    /// path to the raw input pixels
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// path to write the filtered pixels to
    #[argh(option, short = 'o')]
    output: PathBuf,

    /// the image width in pixels
    #[argh(option)]
    width: usize,

    /// the image height in pixels
    #[argh(option)]
    height: usize,

    /// the kernel preset, or `all` to write one file per preset
    #[argh(option, default = "String::from(\"identity\")")]
    kernel: String,

    /// the number of worker threads, uses the global pool if not set
    #[argh(option)]
    threads: Option<usize>,
}

/// Where the filtered image for `preset` is written.
///
/// With a single preset the output path is used as is, otherwise the preset
/// name is appended to the file stem: `out.raw` becomes `out_sharpen.raw`.
fn output_path(output: &Path, preset: KernelPreset, all: bool) -> PathBuf {
    if !all {
        return output.to_path_buf();
    }
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match output.extension() {
        Some(ext) => format!("{stem}_{preset}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{preset}"),
    };
    output.with_file_name(file_name)
}

fn run(args: &Args) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let (presets, all) = match args.kernel.to_lowercase().as_str() {
        "all" => (KernelPreset::ALL.to_vec(), true),
        name => (vec![name.parse::<KernelPreset>()?], false),
    };

    let strategy = match args.threads {
        Some(n) => ExecutionStrategy::Fixed(n),
        None => ExecutionStrategy::Auto,
    };

    let size = ImageSize {
        width: args.width,
        height: args.height,
    };
    let image = Image::new(size, std::fs::read(&args.input)?)?;

    log::info!(
        "loaded {} with {} channel(s), {}",
        args.input.display(),
        image.num_channels(),
        size
    );

    let mut written = Vec::with_capacity(presets.len());
    for preset in presets {
        let filtered = convolve_with(&image, &preset.kernel(), strategy)?;
        let path = output_path(&args.output, preset, all);
        std::fs::write(&path, filtered.as_slice())?;
        log::info!("wrote {preset} to {}", path.display());
        written.push(path);
    }

    Ok(written)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let written = run(&args)?;
    println!("Finished. Wrote {} file(s).", written.len());

    Ok(())
}
