//! FFmpeg filter-graph construction for per-clip transformations.
//!
//! Every segment gets its timestamps normalized (`setpts=PTS-STARTPTS`,
//! `aresample=async=1`) so the later concat step sees a clean stream.

use crate::clip::CropRect;

/// Minimum and maximum per-stage `atempo` values accepted by ffmpeg
const ATEMPO_MIN: f64 = 0.5;
const ATEMPO_MAX: f64 = 2.0;

/// Crop filter from a corner-pair rectangle: `crop=w:h:x1:y1`
pub fn crop_filter(rect: CropRect) -> String {
    format!(
        "crop={}:{}:{}:{}",
        rect.width(),
        rect.height(),
        rect.x1,
        rect.y1
    )
}

/// Scale filter to an exact target size, resetting the sample aspect ratio
pub fn scale_filter(width: u32, height: u32) -> String {
    format!("scale={width}:{height},setsar=1")
}

/// Video timestamp filter: normalizes to zero and applies the speed factor.
///
/// The factor is a speed multiplier (the moviepy `speedx` convention):
/// factor < 1 stretches timestamps, slowing playback so a clip of duration d
/// plays for d / factor.
pub fn video_pts_filter(speed_factor: Option<f64>) -> String {
    match speed_factor {
        Some(factor) => format!("setpts=(PTS-STARTPTS)/{factor:.6}"),
        None => "setpts=PTS-STARTPTS".to_string(),
    }
}

/// Decompose a speed factor into a chain of `atempo` stages.
///
/// ffmpeg limits a single `atempo` to [0.5, 2.0]; factors outside that range
/// are expressed as a product of in-range stages.
pub fn atempo_chain(factor: f64) -> String {
    let mut stages: Vec<f64> = Vec::new();
    let mut remaining = factor;

    while remaining < ATEMPO_MIN {
        stages.push(ATEMPO_MIN);
        remaining /= ATEMPO_MIN;
    }
    while remaining > ATEMPO_MAX {
        stages.push(ATEMPO_MAX);
        remaining /= ATEMPO_MAX;
    }
    stages.push(remaining);

    stages
        .iter()
        .map(|s| format!("atempo={s:.6}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Complete video filter chain for one segment.
///
/// Order matches the original pipeline: crop, then speed change, then (for
/// clips after the first) scale to the common target size.
pub fn segment_video_filter(
    crop: Option<CropRect>,
    speed_factor: Option<f64>,
    scale_to: Option<(u32, u32)>,
) -> String {
    let mut parts = Vec::new();

    if let Some(rect) = crop {
        parts.push(crop_filter(rect));
    }

    parts.push(video_pts_filter(speed_factor));

    if let Some((width, height)) = scale_to {
        parts.push(scale_filter(width, height));
    } else {
        parts.push("setsar=1".to_string());
    }

    parts.join(",")
}

/// Complete audio filter chain for one segment
pub fn segment_audio_filter(speed_factor: Option<f64>) -> String {
    match speed_factor {
        Some(factor) => format!("{},aresample=async=1:first_pts=0", atempo_chain(factor)),
        None => "aresample=async=1:first_pts=0".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_filter_maps_corners_to_size_and_offset() {
        let rect = CropRect::new(10, 20, 330, 260);
        assert_eq!(crop_filter(rect), "crop=320:240:10:20");
    }

    #[test]
    fn test_scale_filter() {
        assert_eq!(scale_filter(1920, 1080), "scale=1920:1080,setsar=1");
    }

    #[test]
    fn test_pts_filter_without_speed_only_normalizes() {
        assert_eq!(video_pts_filter(None), "setpts=PTS-STARTPTS");
    }

    #[test]
    fn test_pts_filter_divides_by_factor() {
        // factor 0.5 doubles timestamps: half speed, double duration
        assert_eq!(video_pts_filter(Some(0.5)), "setpts=(PTS-STARTPTS)/0.500000");
    }

    #[test]
    fn test_atempo_in_range_is_single_stage() {
        assert_eq!(atempo_chain(0.75), "atempo=0.750000");
        assert_eq!(atempo_chain(1.5), "atempo=1.500000");
    }

    #[test]
    fn test_atempo_chain_below_range() {
        // 0.25 = 0.5 * 0.5
        assert_eq!(atempo_chain(0.25), "atempo=0.500000,atempo=0.500000");
    }

    #[test]
    fn test_atempo_chain_above_range() {
        // 5.0 = 2.0 * 2.5 -> 2.0 * 2.0 * 1.25
        assert_eq!(
            atempo_chain(5.0),
            "atempo=2.000000,atempo=2.000000,atempo=1.250000"
        );
    }

    #[test]
    fn test_atempo_chain_product_matches_factor() {
        for factor in [0.1, 0.3, 0.5, 0.9, 1.0, 1.7, 3.0, 10.0] {
            let product: f64 = atempo_chain(factor)
                .split(',')
                .map(|s| s.trim_start_matches("atempo=").parse::<f64>().unwrap())
                .product();
            assert!(
                (product - factor).abs() < 1e-4,
                "chain product {product} != factor {factor}"
            );
        }
    }

    #[test]
    fn test_segment_video_filter_full_chain() {
        let filter = segment_video_filter(
            Some(CropRect::new(0, 0, 320, 240)),
            Some(0.5),
            Some((640, 480)),
        );
        assert_eq!(
            filter,
            "crop=320:240:0:0,setpts=(PTS-STARTPTS)/0.500000,scale=640:480,setsar=1"
        );
    }

    #[test]
    fn test_segment_video_filter_bare_clip() {
        // First clip, untransformed: normalization only
        assert_eq!(segment_video_filter(None, None, None), "setpts=PTS-STARTPTS,setsar=1");
    }

    #[test]
    fn test_segment_audio_filter() {
        assert_eq!(segment_audio_filter(None), "aresample=async=1:first_pts=0");
        assert_eq!(
            segment_audio_filter(Some(2.0)),
            "atempo=2.000000,aresample=async=1:first_pts=0"
        );
    }
}
