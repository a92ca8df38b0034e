//! Asynchronous asset loading for the browser.

use crate::audio::SampleHandle;
use crate::constants::{image_path, sample_path, BACKGROUND_VIDEO_PATH};
use pad_core::{AssetBank, ImageBank, LoadError, SampleBank};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub struct LoadedAssets {
    pub samples: SampleBank<SampleHandle>,
    pub images: ImageBank<web::HtmlImageElement>,
}

async fn load_sample(
    audio_ctx: &web::AudioContext,
    index: usize,
) -> Result<SampleHandle, LoadError> {
    let path = sample_path(index);
    let missing = |path: &str| LoadError::Missing {
        index,
        path: path.to_string(),
    };
    let decode = |e: wasm_bindgen::JsValue| LoadError::Decode {
        index,
        reason: format!("{:?}", e),
    };

    let window = web::window().ok_or_else(|| missing(&path))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(&path))
        .await
        .map_err(|_| missing(&path))?
        .dyn_into()
        .map_err(decode)?;
    if !resp.ok() {
        return Err(missing(&path));
    }
    let bytes: js_sys::ArrayBuffer = JsFuture::from(resp.array_buffer().map_err(decode)?)
        .await
        .map_err(decode)?
        .dyn_into()
        .map_err(decode)?;
    let decoding = audio_ctx.decode_audio_data(&bytes).map_err(decode)?;
    let buffer: web::AudioBuffer = JsFuture::from(decoding)
        .await
        .map_err(decode)?
        .dyn_into()
        .map_err(decode)?;
    Ok(SampleHandle { index, buffer })
}

async fn load_image(index: usize) -> Result<web::HtmlImageElement, LoadError> {
    let path = image_path(index);
    let missing = || LoadError::Missing {
        index,
        path: path.clone(),
    };
    let img = web::HtmlImageElement::new().map_err(|_| missing())?;
    img.set_src(&path);
    JsFuture::from(img.decode()).await.map_err(|_| missing())?;
    Ok(img)
}

/// Load every pad's sample and image, reporting failures once.
pub async fn load_all(audio_ctx: &web::AudioContext, count: usize) -> LoadedAssets {
    let mut sample_results = Vec::with_capacity(count);
    let mut image_results = Vec::with_capacity(count);
    for i in 0..count {
        sample_results.push(load_sample(audio_ctx, i).await);
        image_results.push(load_image(i).await);
    }

    let (samples, sample_failures) = AssetBank::from_results(sample_results);
    for e in &sample_failures {
        log::error!("[assets] {} (pad stays silent)", e);
    }
    if !sample_failures.is_empty() {
        log::error!(
            "[assets] {} of {} samples failed to load",
            sample_failures.len(),
            count
        );
    }

    let (images, image_failures) = AssetBank::from_results(image_results);
    for e in &image_failures {
        log::warn!("[assets] {} (drawing placeholder)", e);
    }

    log::info!(
        "[assets] samples {}/{} images {}/{}",
        samples.loaded_count(),
        count,
        images.loaded_count(),
        count
    );
    LoadedAssets { samples, images }
}

/// Hidden, muted, looping background video. Playback starts with audio.
pub fn create_background_video(document: &web::Document) -> Option<web::HtmlVideoElement> {
    let video: web::HtmlVideoElement = document
        .create_element("video")
        .ok()?
        .dyn_into()
        .ok()?;
    video.set_src(BACKGROUND_VIDEO_PATH);
    video.set_muted(true);
    video.set_default_muted(true);
    video.set_loop(true);
    _ = video.set_attribute("playsinline", "");
    video.set_volume(0.0);
    Some(video)
}

pub fn play_background_video(video: &web::HtmlVideoElement) {
    video.set_muted(true);
    video.set_volume(0.0);
    match video.play() {
        Ok(_) => log::info!("[video] background loop started"),
        Err(e) => log::warn!("[video] play rejected: {:?}", e),
    }
}
