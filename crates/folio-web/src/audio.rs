//! Background music and the frequency analyser that drives the scene.
//!
//! The `AudioContext` is created on the first enable (a user gesture), so the
//! analyser is absent until sound has been switched on at least once.

use folio_core::constants::FFT_SIZE;
use folio_core::{band_intensities, BandIntensities, BandRanges};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub const MUSIC_URL: &str = "/assets/music.mp3";
const MUSIC_VOLUME: f64 = 0.4;

struct AnalyserGraph {
    ctx: web::AudioContext,
    analyser: web::AnalyserNode,
    _source: web::MediaElementAudioSourceNode,
}

fn build_graph(element: &web::HtmlAudioElement) -> anyhow::Result<AnalyserGraph> {
    let ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let analyser = ctx
        .create_analyser()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    analyser.set_fft_size(FFT_SIZE);
    let source = ctx
        .create_media_element_source(element)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    source
        .connect_with_audio_node(&analyser)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    analyser
        .connect_with_audio_node(&ctx.destination())
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(AnalyserGraph {
        ctx,
        analyser,
        _source: source,
    })
}

pub struct Music {
    element: web::HtmlAudioElement,
    graph: Option<AnalyserGraph>,
    enabled: bool,
    bins: Vec<u8>,
    ranges: BandRanges,
}

impl Music {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let element =
            web::HtmlAudioElement::new_with_src(url).map_err(|e| anyhow::anyhow!("{:?}", e))?;
        element.set_loop(true);
        element.set_volume(MUSIC_VOLUME);
        Ok(Self {
            element,
            graph: None,
            enabled: false,
            bins: vec![0; (FFT_SIZE / 2) as usize],
            ranges: BandRanges::default(),
        })
    }

    pub fn toggle(&mut self) -> bool {
        self.set_enabled(!self.enabled);
        self.enabled
    }

    pub fn set_enabled(&mut self, on: bool) {
        self.enabled = on;
        if !on {
            _ = self.element.pause();
            return;
        }
        if self.graph.is_none() {
            match build_graph(&self.element) {
                Ok(g) => {
                    log::info!("[audio] analyser ready fft={}", FFT_SIZE);
                    self.graph = Some(g);
                }
                // music still plays, visuals fall back to neutral values
                Err(e) => log::warn!("[audio] analyser unavailable: {:?}", e),
            }
        }
        if let Some(g) = &self.graph {
            if g.ctx.state() == web::AudioContextState::Suspended {
                _ = g.ctx.resume();
            }
        }
        match self.element.play() {
            Ok(promise) => spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::warn!("[audio] play blocked: {:?}", e);
                }
            }),
            Err(e) => log::warn!("[audio] play failed: {:?}", e),
        }
    }

    /// Band intensities for this frame; `None` while sound is off or the
    /// analyser could not be built.
    pub fn bands(&mut self) -> Option<BandIntensities> {
        if !self.enabled {
            return None;
        }
        let g = self.graph.as_ref()?;
        let n = g.analyser.frequency_bin_count() as usize;
        if self.bins.len() != n {
            self.bins.resize(n, 0);
        }
        g.analyser.get_byte_frequency_data(&mut self.bins);
        Some(band_intensities(&self.bins, &self.ranges))
    }

    pub fn close(&mut self) {
        _ = self.element.pause();
        if let Some(g) = self.graph.take() {
            _ = g.ctx.close();
        }
        self.enabled = false;
    }
}
