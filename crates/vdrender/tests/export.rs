use once_cell::sync::Lazy;
use rgb::FromSlice;
use vdrender::{export, export_source, ErrorKind, ImageSource, Options, RasterFormat};

static OPTIONS: Lazy<Options> = Lazy::new(Options::default);

const HOME_ICON: &str = r#"<vector android:width="24dp" android:height="24dp" android:viewportWidth="24" android:viewportHeight="24"><path android:fillColor="@color/x" android:pathData="M1,1 L2,2"/></vector>"#;

// A 20x20 image with a red square in the top-left corner, the rest is transparent.
const CORNER_SQUARE: &str = "<svg xmlns='http://www.w3.org/2000/svg' width='20' height='20'>
    <rect width='10' height='10' fill='#ff0000'/>
</svg>";

fn decode_png(data: &[u8]) -> vdrender::tiny_skia::Pixmap {
    vdrender::tiny_skia::Pixmap::decode_png(data).unwrap()
}

fn pixel(pixmap: &vdrender::tiny_skia::Pixmap, x: u32, y: u32) -> rgb::RGBA8 {
    pixmap.data().as_rgba()[(y * pixmap.width() + x) as usize]
}

fn is_close(a: u8, b: u8) -> bool {
    (a as i32 - b as i32).abs() <= 8
}

#[test]
fn translated_png_keeps_natural_size() {
    let svg = vdsvg::translate(HOME_ICON).unwrap();
    let img = export(&svg, RasterFormat::PNG, &OPTIONS).unwrap();
    assert_eq!(img.format(), RasterFormat::PNG);
    assert_eq!((img.width(), img.height()), (24, 24));

    let pixmap = decode_png(img.data());
    assert_eq!((pixmap.width(), pixmap.height()), (24, 24));
}

#[test]
fn png_keeps_transparency() {
    let img = export(CORNER_SQUARE, RasterFormat::PNG, &OPTIONS).unwrap();
    let pixmap = decode_png(img.data());
    assert_eq!(pixel(&pixmap, 5, 5), rgb::RGBA8::new(255, 0, 0, 255));
    assert_eq!(pixel(&pixmap, 15, 15).a, 0);
}

#[test]
fn jpeg_has_opaque_background() {
    let img = export(CORNER_SQUARE, RasterFormat::JPEG, &OPTIONS).unwrap();
    assert_eq!((img.width(), img.height()), (20, 20));

    let decoded = image::load_from_memory(img.data()).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (20, 20));
    assert!(decoded.pixels().all(|p| p.0[3] == 255));

    // The transparent area is painted with the default #1e293b background.
    let p = decoded.get_pixel(16, 16).0;
    assert!(is_close(p[0], 0x1e) && is_close(p[1], 0x29) && is_close(p[2], 0x3b));

    let p = decoded.get_pixel(3, 3).0;
    assert!(p[0] > 200 && p[1] < 60 && p[2] < 60);
}

#[test]
fn jpeg_custom_background() {
    let opt = Options {
        background: vdrender::tiny_skia::Color::from_rgba8(255, 255, 255, 0),
        ..Options::default()
    };

    let img = export(CORNER_SQUARE, RasterFormat::JPEG, &opt).unwrap();
    let decoded = image::load_from_memory(img.data()).unwrap().to_rgba8();

    // Background alpha is ignored.
    let p = decoded.get_pixel(16, 16).0;
    assert!(p[0] > 245 && p[1] > 245 && p[2] > 245);
}

#[test]
fn tint_is_rendered() {
    let xml = r##"<vector xmlns:android="http://schemas.android.com/apk/res/android"
        android:width="24dp" android:height="24dp" android:tint="#0000FF">
        <path android:fillColor="#FF0000" android:pathData="M0,0h24v24h-24z"/>
    </vector>"##;

    let svg = vdsvg::translate(xml).unwrap();
    let img = export(&svg, RasterFormat::PNG, &OPTIONS).unwrap();
    let pixmap = decode_png(img.data());
    assert_eq!(pixel(&pixmap, 12, 12), rgb::RGBA8::new(0, 0, 255, 255));
}

#[test]
fn scaled_viewport() {
    let xml = r##"<vector xmlns:android="http://schemas.android.com/apk/res/android"
        android:width="48dp" android:height="48dp"
        android:viewportWidth="24" android:viewportHeight="24">
        <path android:fillColor="#00FF00" android:pathData="M0,0h12v12h-12z"/>
    </vector>"##;

    let svg = vdsvg::translate(xml).unwrap();
    let img = export(&svg, RasterFormat::PNG, &OPTIONS).unwrap();
    assert_eq!((img.width(), img.height()), (48, 48));

    let pixmap = decode_png(img.data());
    assert_eq!(pixel(&pixmap, 20, 20), rgb::RGBA8::new(0, 255, 0, 255));
    assert_eq!(pixel(&pixmap, 30, 30).a, 0);
}

#[test]
fn size_fallback() {
    let img = export(
        "<svg xmlns='http://www.w3.org/2000/svg'/>",
        RasterFormat::PNG,
        &OPTIONS,
    )
    .unwrap();
    assert_eq!((img.width(), img.height()), (300, 300));
}

#[test]
fn size_fallback_ignores_content_bounds() {
    let img = export(
        "<svg xmlns='http://www.w3.org/2000/svg'><rect width='5' height='5'/></svg>",
        RasterFormat::PNG,
        &OPTIONS,
    )
    .unwrap();
    assert_eq!((img.width(), img.height()), (300, 300));

    // Drawn unscaled at the origin.
    let pixmap = decode_png(img.data());
    assert_eq!(pixel(&pixmap, 2, 2).a, 255);
    assert_eq!(pixel(&pixmap, 10, 10).a, 0);
    assert_eq!(pixel(&pixmap, 150, 150).a, 0);
}

#[test]
fn declared_size_is_not_replaced() {
    let img = export(
        "<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 16 8'/>",
        RasterFormat::PNG,
        &OPTIONS,
    )
    .unwrap();
    assert_eq!((img.width(), img.height()), (16, 8));
}

#[test]
fn oversized_surface() {
    let e = export(
        "<svg xmlns='http://www.w3.org/2000/svg' width='600000000' height='2'/>",
        RasterFormat::PNG,
        &OPTIONS,
    )
    .unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Encode);
    assert_eq!(
        e.to_string(),
        "failed to allocate a 600000000x2 drawing surface"
    );
}

#[test]
fn unicode_svg() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg' width='10' height='10'>
        <title>Biểu tượng 图标 アイコン</title>
        <rect width='10' height='10'/>
    </svg>";

    let img = export(svg, RasterFormat::PNG, &OPTIONS).unwrap();
    assert_eq!((img.width(), img.height()), (10, 10));
}

#[test]
fn malformed_svg() {
    let e = export("<svg><rect></svg", RasterFormat::PNG, &OPTIONS).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Render);
}

#[test]
fn invalid_source() {
    let source = ImageSource::from_data_url("data:text/plain,hello".to_string());
    let e = export_source(&source, RasterFormat::PNG, &OPTIONS).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Render);
}

#[test]
fn concurrent_exports_are_independent() {
    let handles: Vec<_> = (1..=8u32)
        .map(|i| {
            std::thread::spawn(move || {
                let size = i * 10;
                let svg = format!(
                    "<svg xmlns='http://www.w3.org/2000/svg' width='{0}' height='{0}'>\
                     <rect width='{0}' height='{0}' fill='#00f'/></svg>",
                    size
                );
                let format = if i % 2 == 0 {
                    RasterFormat::PNG
                } else {
                    RasterFormat::JPEG
                };
                let img = export(&svg, format, &OPTIONS).unwrap();
                (size, img)
            })
        })
        .collect();

    for handle in handles {
        let (size, img) = handle.join().unwrap();
        assert_eq!((img.width(), img.height()), (size, size));
        let decoded = image::load_from_memory(img.data()).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (size, size));
    }
}

#[test]
fn data_url() {
    let img = export(CORNER_SQUARE, RasterFormat::JPEG, &OPTIONS).unwrap();
    assert!(img.to_data_url().starts_with("data:image/jpeg;base64,/9j/"));
}

#[test]
fn format_from_str() {
    assert_eq!("png".parse::<RasterFormat>(), Ok(RasterFormat::PNG));
    assert_eq!("JPG".parse::<RasterFormat>(), Ok(RasterFormat::JPEG));
    assert_eq!("jpeg".parse::<RasterFormat>(), Ok(RasterFormat::JPEG));
    assert!("gif".parse::<RasterFormat>().is_err());
    assert_eq!(
        RasterFormat::from_path(std::path::Path::new("out/icon.jpeg")),
        Some(RasterFormat::JPEG)
    );
    assert!(RasterFormat::JPEG.is_lossy());
    assert!(!RasterFormat::PNG.is_lossy());
}
