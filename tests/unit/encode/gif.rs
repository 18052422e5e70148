use super::*;
use crate::foundation::core::Fps;

use image::AnimationDecoder as _;
use image::codecs::gif::GifDecoder;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("gif_sink_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let p = dir.join(name);
    let _ = std::fs::remove_file(&p);
    p
}

fn cfg(width: u32, height: u32, loop_forever: bool) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::new(4, 1).unwrap(),
        loop_forever,
        frame_count: 2,
    }
}

fn solid(width: u32, height: u32, rgba: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: rgba
            .iter()
            .copied()
            .cycle()
            .take((width * height * 4) as usize)
            .collect(),
    }
}

#[test]
fn writes_decodable_animation_with_delay() {
    let path = scratch("two_frames.gif");
    let mut sink = GifSink::new(GifSinkOpts::new(&path));
    sink.begin(cfg(3, 2, true)).unwrap();
    sink.push_frame(0, &solid(3, 2, [255, 255, 0, 255])).unwrap();
    sink.push_frame(1, &solid(3, 2, [0, 0, 255, 255])).unwrap();
    sink.end().unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(sink.bytes_written(), bytes.len());
    assert!(bytes.starts_with(b"GIF89a"));
    assert!(bytes.windows(11).any(|w| w == b"NETSCAPE2.0"));

    let decoder = GifDecoder::new(std::io::Cursor::new(bytes)).unwrap();
    let frames = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].buffer().dimensions(), (3, 2));
    assert_eq!(frames[0].buffer().get_pixel(0, 0).0, [255, 255, 0, 255]);
    assert_eq!(frames[1].buffer().get_pixel(2, 1).0, [0, 0, 255, 255]);
    assert_eq!(frames[0].delay().numer_denom_ms(), (250, 1));
}

#[test]
fn play_once_omits_loop_extension() {
    let path = scratch("once.gif");
    let mut sink = GifSink::new(GifSinkOpts::new(&path));
    sink.begin(cfg(1, 1, false)).unwrap();
    sink.push_frame(0, &solid(1, 1, [0, 0, 0, 255])).unwrap();
    sink.end().unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(!bytes.windows(11).any(|w| w == b"NETSCAPE2.0"));
}

#[test]
fn nothing_is_written_until_end() {
    let path = scratch("pending.gif");
    let mut sink = GifSink::new(GifSinkOpts::new(&path));
    sink.begin(cfg(1, 1, true)).unwrap();
    sink.push_frame(0, &solid(1, 1, [0, 0, 0, 255])).unwrap();
    assert!(!path.exists());
    assert!(sink.push_frame(1, &solid(2, 1, [0, 0, 0, 255])).is_err());
    assert!(!path.exists());
}

#[test]
fn rejects_bad_configs() {
    let path = scratch("bad.gif");
    let mut sink = GifSink::new(GifSinkOpts::new(&path));
    assert!(sink.begin(cfg(0, 1, true)).is_err());
    assert!(sink.begin(cfg(70_000, 1, true)).is_err());
    assert!(
        sink.begin(SinkConfig {
            fps: Fps { num: 0, den: 1 },
            ..cfg(1, 1, true)
        })
        .is_err()
    );
    assert!(sink.push_frame(0, &solid(1, 1, [0, 0, 0, 255])).is_err());
    assert!(sink.end().is_err());
}

#[test]
fn refuses_to_overwrite_when_asked() {
    let path = scratch("keep.gif");
    std::fs::write(&path, b"existing").unwrap();
    let mut sink = GifSink::new(GifSinkOpts {
        out_path: path.clone(),
        overwrite: false,
    });
    assert!(sink.begin(cfg(1, 1, true)).is_err());
    assert_eq!(std::fs::read(&path).unwrap(), b"existing");
}

#[test]
fn ensure_parent_dir_creates_nested_dirs() {
    let path = PathBuf::from("target")
        .join("gif_sink_unit")
        .join("nested")
        .join("deeper")
        .join("x.gif");
    ensure_parent_dir(&path).unwrap();
    assert!(path.parent().unwrap().is_dir());
    ensure_parent_dir(Path::new("bare.gif")).unwrap();
}

#[test]
fn delay_rounds_to_nearest_centisecond() {
    let fps = |num, den| Fps::new(num, den).unwrap();
    assert_eq!(delay_centis(fps(10, 1)), 10);
    assert_eq!(delay_centis(fps(15, 1)), 7);
    assert_eq!(delay_centis(fps(60, 1)), 2);
    assert_eq!(delay_centis(fps(3, 1)), 33);
    assert_eq!(delay_centis(Fps::from_frame_ms(125).unwrap()), 13);
    assert_eq!(delay_centis(fps(1000, 1)), 1);
    assert_eq!(delay_centis(fps(1, 10_000)), u16::MAX);
}

#[test]
fn odd_frame_rates_keep_their_timing() {
    let path = scratch("fps15.gif");
    let mut sink = GifSink::new(GifSinkOpts::new(&path));
    sink.begin(SinkConfig {
        fps: Fps::new(15, 1).unwrap(),
        ..cfg(2, 2, true)
    })
    .unwrap();
    sink.push_frame(0, &solid(2, 2, [255, 255, 0, 255])).unwrap();
    sink.push_frame(1, &solid(2, 2, [0, 0, 255, 255])).unwrap();
    sink.end().unwrap();

    let decoder = GifDecoder::new(std::io::Cursor::new(std::fs::read(&path).unwrap())).unwrap();
    let frames = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(frames.len(), 2);
    for f in &frames {
        assert_eq!(f.delay().numer_denom_ms(), (70, 1));
    }
}

#[test]
fn many_frames_stream_into_one_file() {
    let path = scratch("long.gif");
    let mut sink = GifSink::new(GifSinkOpts::new(&path));
    sink.begin(SinkConfig {
        frame_count: 40,
        ..cfg(4, 4, true)
    })
    .unwrap();
    for i in 0..40 {
        let color = if i % 2 == 0 {
            [255, 255, 0, 255]
        } else {
            [0, 0, 255, 255]
        };
        sink.push_frame(i, &solid(4, 4, color)).unwrap();
    }
    assert!(!path.exists());
    sink.end().unwrap();

    let decoder = GifDecoder::new(std::io::Cursor::new(std::fs::read(&path).unwrap())).unwrap();
    let frames = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(frames.len(), 40);
    assert_eq!(frames[39].buffer().get_pixel(3, 3).0, [0, 0, 255, 255]);
}
