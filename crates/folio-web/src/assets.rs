use folio_core::mesh;
use folio_core::HeroModel;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub const HERO_MODEL_URL: &str = "/assets/hero.glb";

pub async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("fetch {}: {:?}", url, e))?;
    let resp: web::Response = resp
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if !resp.ok() {
        anyhow::bail!("fetch {}: HTTP {}", url, resp.status());
    }
    let buf = JsFuture::from(resp.array_buffer().map_err(|e| anyhow::anyhow!("{:?}", e))?)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

/// Fetch and decode the hero model. Any failure yields `Unavailable` so the
/// scene falls back to the procedural knot.
pub async fn load_hero(url: &str) -> HeroModel {
    let decoded = match fetch_bytes(url).await {
        Ok(bytes) => mesh::decode_gltf(&bytes).map_err(anyhow::Error::from),
        Err(e) => Err(e),
    };
    match decoded {
        Ok(m) => {
            log::info!(
                "[assets] hero {} vertices={} triangles={}",
                url,
                m.vertices.len(),
                m.triangle_count()
            );
            HeroModel::Loaded(m)
        }
        Err(e) => {
            log::warn!("[assets] hero model unavailable, using fallback: {:?}", e);
            HeroModel::Unavailable
        }
    }
}
