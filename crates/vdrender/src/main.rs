// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#![allow(clippy::uninlined_format_args)]

use std::path;
use std::sync::Arc;

use vdrender::{usvg, RasterFormat};

fn main() {
    if let Err(e) = process() {
        eprintln!("Error: {}.", e);
        std::process::exit(1);
    }
}

fn timed<F, T>(perf: bool, name: &str, mut f: F) -> T
where
    F: FnMut() -> T,
{
    let now = std::time::Instant::now();
    let result = f();
    if perf {
        let elapsed = now.elapsed().as_micros() as f64 / 1000.0;
        eprintln!("{}: {:.2}ms", name, elapsed);
    }

    result
}

fn process() -> Result<(), String> {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            println!("{}", HELP);
            return Err(e);
        }
    };

    if !args.quiet {
        if let Ok(()) = log::set_logger(&LOGGER) {
            log::set_max_level(log::LevelFilter::Warn);
        }
    }

    let xml_data = timed(args.perf, "Reading", || -> Result<Vec<u8>, &str> {
        if let InputFrom::File(ref file) = args.in_xml {
            std::fs::read(file).map_err(|_| "failed to open the provided file")
        } else {
            use std::io::Read;
            let mut buf = Vec::new();
            let stdin = std::io::stdin();
            let mut handle = stdin.lock();
            handle
                .read_to_end(&mut buf)
                .map_err(|_| "failed to read stdin")?;
            Ok(buf)
        }
    })?;

    let xml_string = std::str::from_utf8(&xml_data)
        .map_err(|_| "provided data has not an UTF-8 encoding".to_string())?;

    let svg_string = timed(args.perf, "Translation", || {
        vdsvg::translate_with(xml_string, &args.vdsvg).map_err(|e| e.to_string())
    })?;

    let data = match args.format {
        OutputFormat::Svg => svg_string.into_bytes(),
        OutputFormat::Raster(format) => {
            let mut opt = args.vdrender.clone();
            if !args.skip_system_fonts && has_text_nodes(&svg_string) {
                timed(args.perf, "FontDB", || {
                    let mut fontdb = usvg::fontdb::Database::new();
                    fontdb.load_system_fonts();
                    opt.fontdb = Arc::new(fontdb);
                });
            }

            let img = timed(args.perf, "Rendering", || {
                vdrender::export(&svg_string, format, &opt).map_err(|e| e.to_string())
            })?;
            img.into_data()
        }
    };

    match args.out_file {
        OutputTo::Stdout => {
            use std::io::Write;
            std::io::stdout()
                .write_all(&data)
                .map_err(|_| "failed to write to stdout".to_string())?;
        }
        OutputTo::File(ref file) => {
            timed(args.perf, "Saving", || {
                std::fs::write(file, &data).map_err(|e| e.to_string())
            })?;
        }
    }

    Ok(())
}

const HELP: &str = "\
vdrender converts Android Vector Drawables and SVG into PNG, JPEG or SVG.

USAGE:
  vdrender [OPTIONS] <in-xml> <out-file>  # from file to file
  vdrender [OPTIONS] <in-xml> -c          # from file to stdout
  vdrender [OPTIONS] - <out-file>         # from stdin to file
  vdrender [OPTIONS] - -c                 # from stdin to stdout

  vdrender ic_home.xml ic_home.png
  vdrender ic_home.xml ic_home.svg
  vdrender --format jpeg --quality 75 ic_home.xml -c

OPTIONS:
      --help                    Prints this help
  -V, --version                 Prints version
  -c                            Prints the output to the stdout

  -f, --format FORMAT           Sets the output format
                                [default: output file extension]
                                [possible values: png, jpeg, jpg, svg]
  --background COLOR            Sets the background color for JPEG output
                                Examples: white, #fff, #1e293b
                                [default: #1e293b]
  --quality QUALITY             Sets the JPEG quality
                                [default: 90] [possible values: 1..100 (inclusive)]
  --default-size LENGTH         Sets the Vector Drawable size used when
                                'android:width' or 'android:height' is not set
                                [default: 24]
  --strict                      Rejects malformed SVG input instead of
                                passing it through

  --skip-system-fonts           Disables system fonts loading for SVG text

  --perf                        Prints performance stats
  --quiet                       Disables warnings

ARGS:
  <in-xml>                      Input file
  <out-file>                    Output file
";

#[derive(Debug)]
struct CliArgs {
    format: Option<OutputFormat>,
    background: Option<svgtypes::Color>,
    quality: u8,
    default_size: Option<String>,
    strict: bool,
    skip_system_fonts: bool,
    perf: bool,
    quiet: bool,

    input: String,
    output: String,
}

fn collect_args() -> Result<CliArgs, pico_args::Error> {
    let mut input = pico_args::Arguments::from_env();

    if input.contains("--help") {
        print!("{}", HELP);
        std::process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    Ok(CliArgs {
        format: input.opt_value_from_str(["-f", "--format"])?,
        background: input.opt_value_from_str("--background")?,
        quality: input
            .opt_value_from_fn("--quality", parse_quality)?
            .unwrap_or(90),
        default_size: input.opt_value_from_fn("--default-size", parse_default_size)?,
        strict: input.contains("--strict"),
        skip_system_fonts: input.contains("--skip-system-fonts"),
        perf: input.contains("--perf"),
        quiet: input.contains("--quiet"),

        input: input.free_from_str()?,
        output: input.free_from_str()?,
    })
}

fn parse_quality(s: &str) -> Result<u8, String> {
    let n: u8 = s.parse().map_err(|_| "invalid quality")?;

    if (1..=100).contains(&n) {
        Ok(n)
    } else {
        Err("quality out of bounds".to_string())
    }
}

fn parse_default_size(s: &str) -> Result<String, String> {
    let n: f32 = s.parse().map_err(|_| "invalid length")?;

    if n.is_finite() && n > 0.0 {
        Ok(s.to_string())
    } else {
        Err("LENGTH should be positive".to_string())
    }
}

#[derive(Clone, PartialEq, Debug)]
enum InputFrom {
    Stdin,
    File(path::PathBuf),
}

#[derive(Clone, PartialEq, Debug)]
enum OutputTo {
    Stdout,
    File(path::PathBuf),
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum OutputFormat {
    Raster(RasterFormat),
    Svg,
}

impl std::str::FromStr for OutputFormat {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("svg") {
            Ok(OutputFormat::Svg)
        } else {
            s.parse().map(OutputFormat::Raster)
        }
    }
}

struct Args {
    in_xml: InputFrom,
    out_file: OutputTo,
    format: OutputFormat,
    perf: bool,
    quiet: bool,
    skip_system_fonts: bool,
    vdsvg: vdsvg::Options,
    vdrender: vdrender::Options,
}

fn parse_args() -> Result<Args, String> {
    let args = collect_args().map_err(|e| e.to_string())?;

    let in_xml = if args.input == "-" {
        InputFrom::Stdin
    } else if args.input == "-c" {
        return Err("-c should be set after input".to_string());
    } else {
        InputFrom::File(args.input.clone().into())
    };

    let out_file = if args.output == "-c" {
        OutputTo::Stdout
    } else {
        OutputTo::File(args.output.clone().into())
    };

    let format = match (args.format, &out_file) {
        (Some(format), _) => format,
        (None, OutputTo::File(ref path)) => detect_format(path)?,
        (None, OutputTo::Stdout) => {
            return Err("--format must be set when printing to the stdout".to_string())
        }
    };

    let mut vdsvg = vdsvg::Options::default();
    vdsvg.strict = args.strict;
    if let Some(size) = args.default_size {
        vdsvg.default_size = size;
    }

    let mut vdrender = vdrender::Options::default();
    vdrender.jpeg_quality = args.quality;
    if let Some(background) = args.background {
        vdrender.background = svg_to_skia_color(background);
    }

    if args.background.is_some() && format != OutputFormat::Raster(RasterFormat::JPEG) {
        eprintln!("Warning: --background has no effect without JPEG output.");
    }

    Ok(Args {
        in_xml,
        out_file,
        format,
        perf: args.perf,
        quiet: args.quiet,
        skip_system_fonts: args.skip_system_fonts,
        vdsvg,
        vdrender,
    })
}

fn detect_format(path: &path::Path) -> Result<OutputFormat, String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| "cannot detect the output format, use --format".to_string())?;

    ext.parse()
        .map_err(|_| format!("'{}' is not a supported output format", ext))
}

fn has_text_nodes(svg: &str) -> bool {
    match usvg::roxmltree::Document::parse(svg) {
        Ok(doc) => doc
            .descendants()
            .any(|n| n.has_tag_name(("http://www.w3.org/2000/svg", "text"))),
        Err(_) => false,
    }
}

fn svg_to_skia_color(color: svgtypes::Color) -> vdrender::tiny_skia::Color {
    vdrender::tiny_skia::Color::from_rgba8(color.red, color.green, color.blue, color.alpha)
}

/// A simple stderr logger.
static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::LevelFilter::Warn
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let line = record.line().unwrap_or(0);
            let args = record.args();

            match record.level() {
                log::Level::Error => eprintln!("Error (in {}:{}): {}", target, line, args),
                log::Level::Warn => eprintln!("Warning (in {}:{}): {}", target, line, args),
                log::Level::Info => eprintln!("Info (in {}:{}): {}", target, line, args),
                log::Level::Debug => eprintln!("Debug (in {}:{}): {}", target, line, args),
                log::Level::Trace => eprintln!("Trace (in {}:{}): {}", target, line, args),
            }
        }
    }

    fn flush(&self) {}
}
