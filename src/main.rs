use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use glyphpack_config::GlyphpackConfig;
use glyphpack_core::{DefaultRasterizer, FontAtlasSet, FontSource, LogDiagnostics};

const USAGE: &str = "usage: glyphpack [--config FILE] [FONT] [--px HEIGHT] [--pt SIZE_26_6] \
[--dpi DPI] [--out FILE] [--glyph-dir DIR] [--dump]";

struct Args {
    config: Option<PathBuf>,
    font: Option<PathBuf>,
    px: Option<u32>,
    pt: Option<i64>,
    dpi: Option<u32>,
    out: Option<PathBuf>,
    glyph_dir: Option<PathBuf>,
    dump: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        config: None,
        font: None,
        px: None,
        pt: None,
        dpi: None,
        out: None,
        glyph_dir: None,
        dump: false,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        let mut value = || it.next().ok_or_else(|| anyhow!("{arg} needs a value\n{USAGE}"));
        match arg.as_str() {
            "--config" => args.config = Some(value()?.into()),
            "--px" => args.px = Some(value()?.parse().context("--px")?),
            "--pt" => args.pt = Some(value()?.parse().context("--pt")?),
            "--dpi" => args.dpi = Some(value()?.parse().context("--dpi")?),
            "--out" => args.out = Some(value()?.into()),
            "--glyph-dir" => args.glyph_dir = Some(value()?.into()),
            "--dump" => args.dump = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            flag if flag.starts_with("--") => bail!("unknown option {flag}\n{USAGE}"),
            _ => args.font = Some(arg.into()),
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = parse_args()?;

    let mut config = match &args.config {
        Some(path) => GlyphpackConfig::load_from_file(path).map_err(|e| anyhow!(e))?,
        None => GlyphpackConfig::load_or_default(),
    };
    config.merge_with_env();

    // Command line wins over file and environment.
    if let Some(font) = args.font {
        config.font.path = Some(font);
    }
    if let Some(px) = args.px {
        config.font.pixel_height = Some(px);
    }
    if let Some(pt) = args.pt {
        config.font.point_size = pt;
        config.font.pixel_height = None;
    }
    if let Some(dpi) = args.dpi {
        config.font.width_dpi = dpi;
        config.font.height_dpi = dpi;
    }
    if let Some(out) = args.out {
        config.output.atlas_png = out;
    }
    if args.glyph_dir.is_some() {
        config.output.glyph_dir = args.glyph_dir;
    }

    let font_path = config
        .font
        .path
        .clone()
        .ok_or_else(|| anyhow!("no font given\n{USAGE}"))?;
    let source = FontSource::Path(font_path.clone());
    let size = config.font.size_spec();
    let options = config.atlas.atlas_options();

    let mut rasterizer =
        DefaultRasterizer::open_indexed(&source, config.font.index, &size, &LogDiagnostics)
            .with_context(|| format!("opening {}", font_path.display()))?;
    let font = FontAtlasSet::build_with(&mut rasterizer, options, &LogDiagnostics)?;
    drop(rasterizer);

    let atlas = font.atlas();
    let out = &config.output.atlas_png;
    font.export_atlas_png(out).with_context(|| format!("writing {}", out.display()))?;
    log::info!(
        "wrote {}x{} atlas with {} characters to {}",
        atlas.width,
        atlas.height,
        font.len(),
        out.display()
    );

    if let Some(dir) = &config.output.glyph_dir {
        std::fs::create_dir_all(dir)?;
        let written = font
            .export_glyph_pngs(dir)
            .with_context(|| format!("writing glyphs to {}", dir.display()))?;
        log::info!("wrote {written} glyph images to {}", dir.display());
    }

    if args.dump {
        for (ch, metrics) in font.characters() {
            let (adv_x, adv_y) = metrics.advance_px();
            println!(
                "U+{:04X} {:?} size {}x{} bearing ({}, {}) advance ({}, {})",
                ch as u32,
                ch,
                metrics.bitmap_width,
                metrics.bitmap_height,
                metrics.bearing_x,
                metrics.bearing_y,
                adv_x,
                adv_y
            );
            if let (Some(cell), Some(uv)) = (&metrics.cell, &metrics.uv) {
                println!("{cell}\n{uv}");
            }
        }
    }

    Ok(())
}
