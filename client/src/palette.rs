use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use allapis_shared::palette::{PaletteRequest, PaletteResponse, css_rgb};

/// The relay route; same origin, so no CORS dance with the plain-HTTP
/// Colormind host.
const RELAY_URL: &str = "/api/colormind";

async fn fetch_palette(request: &PaletteRequest) -> Result<Vec<[u8; 3]>, String> {
    let resp = gloo_net::http::Request::post(RELAY_URL)
        .json(request)
        .map_err(|e| format!("encode error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    let payload = resp
        .json::<PaletteResponse>()
        .await
        .map_err(|e| format!("parse error: {e}"))?;
    Ok(payload.result)
}

fn load_palette(
    palette: RwSignal<Option<Vec<[u8; 3]>>>,
    loading: RwSignal<bool>,
    error: RwSignal<Option<String>>,
    fetch_nonce: RwSignal<u64>,
) {
    let request_nonce = fetch_nonce.get_untracked().wrapping_add(1);
    fetch_nonce.set(request_nonce);
    loading.set(true);
    error.set(None);

    spawn_local(async move {
        let result = fetch_palette(&PaletteRequest::seeded()).await;
        if fetch_nonce.get_untracked() != request_nonce {
            return;
        }
        loading.set(false);
        match result {
            Ok(colors) => palette.set(Some(colors)),
            Err(e) => error.set(Some(e)),
        }
    });
}

#[component]
pub fn ColorPalette() -> impl IntoView {
    let palette: RwSignal<Option<Vec<[u8; 3]>>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let fetch_nonce: RwSignal<u64> = RwSignal::new(0);

    load_palette(palette, loading, error, fetch_nonce);

    view! {
        <div>
            <div style="margin-bottom: 16px;">
                <h1 style="margin-bottom: 4px;">"Color Palette"</h1>
                <p style="color: #9a9590;">
                    "Five-color palettes from the Colormind model, seeded with two fixed colors"
                </p>
            </div>

            {move || {
                loading
                    .get()
                    .then(|| {
                        view! {
                            <p style="color: #9a9590;">"Loading palette\u{2026}"</p>
                        }
                    })
            }}

            {move || {
                error
                    .get()
                    .map(|message| {
                        view! {
                            <div style="padding: 16px; background: #2a1a1a; border: 1px solid #5a2828; border-radius: 8px; color: #e08080;">
                                {format!("Error: {message}")}
                            </div>
                        }
                    })
            }}

            {move || {
                palette
                    .get()
                    .map(|colors| {
                        view! {
                            <div style="display: flex; gap: 8px; flex-wrap: wrap;">
                                {colors
                                    .into_iter()
                                    .map(|rgb| {
                                        view! {
                                            <div style=format!(
                                                "flex: 1; min-width: 120px; height: 160px; border-radius: 8px; background: {}; display: flex; align-items: flex-end; justify-content: center; padding-bottom: 12px;",
                                                css_rgb(rgb),
                                            )>
                                                <span style="background: rgba(0,0,0,0.55); color: #e2e0d8; border-radius: 4px; padding: 2px 8px; font-size: 0.75rem; font-family: 'JetBrains Mono', monospace;">
                                                    {format!("RGB({}, {}, {})", rgb[0], rgb[1], rgb[2])}
                                                </span>
                                            </div>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        }
                    })
            }}

            <button
                style="margin-top: 16px; background: #f5c542; color: #13161f; border: none; border-radius: 6px; padding: 8px 16px; font-weight: 600; cursor: pointer;"
                on:click=move |_| load_palette(palette, loading, error, fetch_nonce)
            >
                "Generate New Palette"
            </button>
        </div>
    }
}
