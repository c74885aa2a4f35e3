use chrono::NaiveDate;
use gloo_storage::Storage;
use leptos::prelude::*;

use allapis_shared::gibs::{self, GibsLayer, LAYERS};
use allapis_shared::tile::{GridLoadTracker, GridPhase, GridRequest, TileCoord};

const SETTINGS_KEY: &str = "allapis_space_settings";

fn fresh_cache_token() -> u64 {
    js_sys::Date::now() as u64
}

fn default_request(cache_token: u64) -> GridRequest {
    GridRequest {
        layer: LAYERS[0].id.to_string(),
        date: NaiveDate::from_ymd_opt(2024, 1, 1),
        zoom: 6,
        center: TileCoord::new(13, 36),
        size: 3,
        cache_token,
    }
}

/// Last-used controls from local storage, with a fresh cache token so a page
/// reload refetches tiles. Unknown layer ids (stale catalog entries) fall back
/// to the defaults.
fn restore_request() -> GridRequest {
    let cache_token = fresh_cache_token();
    let mut request: GridRequest = gloo_storage::LocalStorage::get(SETTINGS_KEY)
        .unwrap_or_else(|_| default_request(cache_token));
    if gibs::layer_by_id(&request.layer).is_none() {
        request = default_request(cache_token);
    }
    request.cache_token = cache_token;
    request
}

/// Clamp a center candidate into the layer's tile matrix at the given zoom.
/// The grid generator itself only drops negatives; bounding the *inputs* here
/// keeps every requested tile addressable.
fn clamp_center(layer: &GibsLayer, zoom: u8, x: u32, y: u32) -> TileCoord {
    let (cols, rows) = gibs::matrix_size(zoom.min(layer.max_zoom));
    TileCoord::new(x.min(cols - 1), y.min(rows - 1))
}

/// Number of columns the rendered grid actually has. Rows near the left edge
/// all lose the same dropped-negative columns, so one count covers the grid.
fn visible_columns(center: TileCoord, size: u32) -> u32 {
    let offset = i64::from(size / 2);
    let truncated = (offset - i64::from(center.x)).max(0);
    (i64::from(size) - truncated).max(0) as u32
}

#[component]
pub fn SpaceImages() -> impl IntoView {
    let request: RwSignal<GridRequest> = RwSignal::new(restore_request());
    let tracker: RwSignal<GridLoadTracker> =
        RwSignal::new(GridLoadTracker::new(request.get_untracked().tile_coords()));
    // Bumped on every input change; tile handlers from superseded grids compare
    // against it and drop their completions instead of clobbering newer state.
    let generation: RwSignal<u64> = RwSignal::new(0);

    let submit = move |next: GridRequest| {
        generation.update(|g| *g = g.wrapping_add(1));
        tracker.update(|t| t.reset(next.tile_coords()));
        let _ = gloo_storage::LocalStorage::set(SETTINGS_KEY, &next);
        request.set(next);
    };

    let tiles = Memo::new(move |_| {
        let req = request.get();
        let layer = gibs::layer_by_id(&req.layer).unwrap_or(&LAYERS[0]);
        req.tile_coords()
            .into_iter()
            .map(|coord| {
                (
                    coord,
                    gibs::tile_url(layer, req.date, req.zoom, coord, Some(req.cache_token)),
                )
            })
            .collect::<Vec<_>>()
    });

    let today = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();

    view! {
        <div>
            <div style="margin-bottom: 16px;">
                <h1 style="margin-bottom: 4px;">"\u{1F30D} NASA Space Images"</h1>
                <p style="color: #9a9590;">
                    "Explore Earth observation imagery from NASA's Global Imagery Browse Services"
                </p>
            </div>

            <div style="padding: 16px; background: #13161f; border: 1px solid #282c3e; border-radius: 8px; margin-bottom: 16px;">
                <h2 style="margin-top: 0;">"Image Controls"</h2>
                <div style="display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 12px;">
                    <label style="display: flex; flex-direction: column; gap: 4px; font-size: 0.8rem; color: #9a9590;">
                        "Layer"
                        <select
                            style="background: #1a1d2a; color: #e2e0d8; border: 1px solid #282c3e; border-radius: 4px; padding: 6px;"
                            on:change=move |ev| {
                                let mut next = request.get_untracked();
                                next.layer = event_target_value(&ev);
                                let layer = gibs::layer_by_id(&next.layer).unwrap_or(&LAYERS[0]);
                                next.zoom = next.zoom.min(layer.max_zoom);
                                next.center = clamp_center(layer, next.zoom, next.center.x, next.center.y);
                                submit(next);
                            }
                        >
                            {LAYERS
                                .iter()
                                .map(|layer| {
                                    view! {
                                        <option
                                            value=layer.id
                                            selected=move || request.get().layer == layer.id
                                        >
                                            {layer.title}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </label>
                    <label style="display: flex; flex-direction: column; gap: 4px; font-size: 0.8rem; color: #9a9590;">
                        "Date"
                        <input
                            type="date"
                            max=today
                            prop:value=move || {
                                request
                                    .get()
                                    .date
                                    .map(|d| d.format("%Y-%m-%d").to_string())
                                    .unwrap_or_default()
                            }
                            style="background: #1a1d2a; color: #e2e0d8; border: 1px solid #282c3e; border-radius: 4px; padding: 6px;"
                            on:change=move |ev| {
                                let mut next = request.get_untracked();
                                next.date = NaiveDate::parse_from_str(&event_target_value(&ev), "%Y-%m-%d").ok();
                                submit(next);
                            }
                        />
                    </label>
                    <label style="display: flex; flex-direction: column; gap: 4px; font-size: 0.8rem; color: #9a9590;">
                        "Zoom Level"
                        <input
                            type="number"
                            min="0"
                            max=move || {
                                let req = request.get();
                                gibs::layer_by_id(&req.layer)
                                    .unwrap_or(&LAYERS[0])
                                    .max_zoom
                                    .to_string()
                            }
                            prop:value=move || request.get().zoom.to_string()
                            style="background: #1a1d2a; color: #e2e0d8; border: 1px solid #282c3e; border-radius: 4px; padding: 6px;"
                            on:change=move |ev| {
                                let mut next = request.get_untracked();
                                let layer = gibs::layer_by_id(&next.layer).unwrap_or(&LAYERS[0]);
                                next.zoom = event_target_value(&ev)
                                    .parse::<u8>()
                                    .unwrap_or(0)
                                    .min(layer.max_zoom);
                                next.center = clamp_center(layer, next.zoom, next.center.x, next.center.y);
                                submit(next);
                            }
                        />
                    </label>
                    <label style="display: flex; flex-direction: column; gap: 4px; font-size: 0.8rem; color: #9a9590;">
                        "Tile X"
                        <input
                            type="number"
                            min="0"
                            prop:value=move || request.get().center.x.to_string()
                            style="background: #1a1d2a; color: #e2e0d8; border: 1px solid #282c3e; border-radius: 4px; padding: 6px;"
                            on:change=move |ev| {
                                let mut next = request.get_untracked();
                                let layer = gibs::layer_by_id(&next.layer).unwrap_or(&LAYERS[0]);
                                let x = event_target_value(&ev).parse::<u32>().unwrap_or(0);
                                next.center = clamp_center(layer, next.zoom, x, next.center.y);
                                submit(next);
                            }
                        />
                    </label>
                    <label style="display: flex; flex-direction: column; gap: 4px; font-size: 0.8rem; color: #9a9590;">
                        "Tile Y"
                        <input
                            type="number"
                            min="0"
                            prop:value=move || request.get().center.y.to_string()
                            style="background: #1a1d2a; color: #e2e0d8; border: 1px solid #282c3e; border-radius: 4px; padding: 6px;"
                            on:change=move |ev| {
                                let mut next = request.get_untracked();
                                let layer = gibs::layer_by_id(&next.layer).unwrap_or(&LAYERS[0]);
                                let y = event_target_value(&ev).parse::<u32>().unwrap_or(0);
                                next.center = clamp_center(layer, next.zoom, next.center.x, y);
                                submit(next);
                            }
                        />
                    </label>
                    <label style="display: flex; flex-direction: column; gap: 4px; font-size: 0.8rem; color: #9a9590;">
                        "Grid Size"
                        <select
                            style="background: #1a1d2a; color: #e2e0d8; border: 1px solid #282c3e; border-radius: 4px; padding: 6px;"
                            on:change=move |ev| {
                                let mut next = request.get_untracked();
                                // Only odd sizes are offered; a true center tile must exist.
                                next.size = event_target_value(&ev).parse::<u32>().unwrap_or(3);
                                submit(next);
                            }
                        >
                            {[1_u32, 3, 5]
                                .into_iter()
                                .map(|n| {
                                    view! {
                                        <option
                                            value=n.to_string()
                                            selected=move || request.get().size == n
                                        >
                                            {format!("{n} \u{00D7} {n}")}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </label>
                </div>
                <button
                    style="margin-top: 12px; background: #f5c542; color: #13161f; border: none; border-radius: 6px; padding: 8px 16px; font-weight: 600; cursor: pointer;"
                    on:click=move |_| {
                        let mut next = request.get_untracked();
                        next.cache_token = fresh_cache_token();
                        submit(next);
                    }
                >
                    "Reload Tiles"
                </button>
            </div>

            {move || {
                let t = tracker.get();
                (t.phase() == GridPhase::Loading)
                    .then(|| {
                        view! {
                            <div style="color: #9a9590; font-size: 0.85rem; margin-bottom: 8px;">
                                {format!("Loading tiles\u{2026} {}/{}", t.loaded_count(), t.expected_count())}
                            </div>
                        }
                    })
            }}

            {move || {
                let phase = tracker.get().phase();
                if phase == GridPhase::Error {
                    return view! {
                        <div style="padding: 16px; background: #2a1a1a; border: 1px solid #5a2828; border-radius: 8px; color: #e08080;">
                            "Failed to load imagery. Please try different coordinates or date."
                        </div>
                    }
                    .into_any();
                }

                let req = request.get();
                let columns = visible_columns(req.center, req.size).max(1);
                let generation_at_render = generation.get_untracked();
                view! {
                    <div style=format!(
                        "display: grid; grid-template-columns: repeat({columns}, 1fr); gap: 2px; opacity: {};",
                        if phase == GridPhase::Loading { "0.35" } else { "1" },
                    )>
                        {tiles
                            .get()
                            .into_iter()
                            .map(|(coord, url)| {
                                view! {
                                    <img
                                        src=url
                                        alt="NASA GIBS Earth observation tile"
                                        style="width: 100%; display: block; background: #13161f;"
                                        on:load=move |_| {
                                            if generation.get_untracked() != generation_at_render {
                                                return;
                                            }
                                            tracker.update(|t| {
                                                t.mark_loaded(coord);
                                            });
                                        }
                                        on:error=move |_| {
                                            if generation.get_untracked() != generation_at_render {
                                                return;
                                            }
                                            tracker.update(|t| {
                                                t.mark_failed(coord);
                                            });
                                        }
                                    />
                                }
                            })
                            .collect_view()}
                    </div>
                }
                .into_any()
            }}

            <div style="margin-top: 16px; padding: 16px; background: #13161f; border: 1px solid #282c3e; border-radius: 8px; font-size: 0.85rem; color: #9a9590;">
                <h3 style="margin-top: 0; color: #e2e0d8;">"About This Imagery"</h3>
                {move || {
                    let req = request.get();
                    let layer = gibs::layer_by_id(&req.layer).unwrap_or(&LAYERS[0]);
                    match req.date.filter(|_| layer.supports_dates) {
                        Some(date) => format!(
                            "{} imagery for {}.",
                            layer.title,
                            date.format("%Y-%m-%d"),
                        ),
                        None => format!("{} imagery (static layer).", layer.title),
                    }
                }}
                <p style="margin-bottom: 0; font-size: 0.75rem;">
                    "Imagery provided by services from NASA's Global Imagery Browse Services (GIBS), \
                     part of NASA's Earth Science Data and Information System (ESDIS)."
                </p>
            </div>
        </div>
    }
}
