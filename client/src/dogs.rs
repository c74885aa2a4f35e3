use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use allapis_shared::dogs::{self, BREEDS, BreedImagesResponse, RandomDogResponse};

/// Breed and sub-breed picked in the selectors. Replaced wholesale on every
/// change so the strip fetch and the random-dog URL always agree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct BreedSelection {
    breed: Option<String>,
    sub_breed: Option<String>,
}

async fn fetch_random_dog(selection: &BreedSelection) -> Result<String, String> {
    let url = dogs::random_image_url(selection.breed.as_deref(), selection.sub_breed.as_deref());
    let resp = gloo_net::http::Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    let payload = resp
        .json::<RandomDogResponse>()
        .await
        .map_err(|e| format!("parse error: {e}"))?;
    Ok(payload.message)
}

async fn fetch_breed_images(breed: &str, sub_breed: Option<&str>) -> Result<Vec<String>, String> {
    let url = dogs::breed_images_url(breed, sub_breed);
    let resp = gloo_net::http::Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    let payload = resp
        .json::<BreedImagesResponse>()
        .await
        .map_err(|e| format!("parse error: {e}"))?;
    if payload.is_success() {
        Ok(payload.message)
    } else {
        Ok(Vec::new())
    }
}

fn load_random(
    selection: BreedSelection,
    featured: RwSignal<Option<String>>,
    fetch_nonce: RwSignal<u64>,
) {
    let request_nonce = fetch_nonce.get_untracked().wrapping_add(1);
    fetch_nonce.set(request_nonce);

    spawn_local(async move {
        match fetch_random_dog(&selection).await {
            Ok(url) => {
                if fetch_nonce.get_untracked() != request_nonce {
                    return;
                }
                featured.set(Some(url));
            }
            Err(e) => {
                if fetch_nonce.get_untracked() != request_nonce {
                    return;
                }
                web_sys::console::warn_1(&format!("Random dog fetch failed: {e}").into());
            }
        }
    });
}

fn load_strip(
    selection: BreedSelection,
    strip: RwSignal<Vec<String>>,
    strip_loading: RwSignal<bool>,
    fetch_nonce: RwSignal<u64>,
) {
    let Some(breed) = selection.breed else {
        strip.set(Vec::new());
        return;
    };

    let request_nonce = fetch_nonce.get_untracked().wrapping_add(1);
    fetch_nonce.set(request_nonce);
    strip_loading.set(true);

    spawn_local(async move {
        let result = fetch_breed_images(&breed, selection.sub_breed.as_deref()).await;
        if fetch_nonce.get_untracked() != request_nonce {
            return;
        }
        strip_loading.set(false);
        match result {
            Ok(images) => strip.set(images),
            Err(e) => {
                web_sys::console::warn_1(&format!("Breed images fetch failed: {e}").into());
                strip.set(Vec::new());
            }
        }
    });
}

#[component]
pub fn Dogs() -> impl IntoView {
    let selection: RwSignal<BreedSelection> = RwSignal::new(BreedSelection::default());
    let featured: RwSignal<Option<String>> = RwSignal::new(None);
    let strip: RwSignal<Vec<String>> = RwSignal::new(Vec::new());
    let strip_loading: RwSignal<bool> = RwSignal::new(false);
    let featured_nonce: RwSignal<u64> = RwSignal::new(0);
    let strip_nonce: RwSignal<u64> = RwSignal::new(0);

    load_random(selection.get_untracked(), featured, featured_nonce);

    view! {
        <div>
            <div style="margin-bottom: 16px;">
                <h1 style="margin-bottom: 4px;">"Dogs API"</h1>
                <p style="color: #9a9590;">"Get random dog images from the Dog CEO API"</p>
            </div>

            <div style="padding: 16px; background: #13161f; border: 1px solid #282c3e; border-radius: 8px; margin-bottom: 16px;">
                <h2 style="margin-top: 0;">"Select Breed"</h2>
                <div style="display: flex; gap: 12px; flex-wrap: wrap;">
                    <label style="display: flex; flex-direction: column; gap: 4px; font-size: 0.8rem; color: #9a9590;">
                        "Breed"
                        <select
                            style="background: #1a1d2a; color: #e2e0d8; border: 1px solid #282c3e; border-radius: 4px; padding: 6px; min-width: 200px;"
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                let next = BreedSelection {
                                    breed: (!value.is_empty()).then_some(value),
                                    sub_breed: None,
                                };
                                selection.set(next.clone());
                                load_strip(next, strip, strip_loading, strip_nonce);
                            }
                        >
                            <option value="">"Random (All Breeds)"</option>
                            {BREEDS
                                .iter()
                                .map(|(breed, _)| {
                                    view! {
                                        <option
                                            value=*breed
                                            selected=move || selection.get().breed.as_deref() == Some(*breed)
                                        >
                                            {dogs::display_name(breed)}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </label>
                    {move || {
                        let current = selection.get();
                        let subs = current
                            .breed
                            .as_deref()
                            .map(dogs::sub_breeds)
                            .unwrap_or(&[]);
                        (!subs.is_empty())
                            .then(|| {
                                view! {
                                    <label style="display: flex; flex-direction: column; gap: 4px; font-size: 0.8rem; color: #9a9590;">
                                        "Sub-breed"
                                        <select
                                            style="background: #1a1d2a; color: #e2e0d8; border: 1px solid #282c3e; border-radius: 4px; padding: 6px; min-width: 160px;"
                                            on:change=move |ev| {
                                                let value = event_target_value(&ev);
                                                let mut next = selection.get_untracked();
                                                next.sub_breed = (!value.is_empty()).then_some(value);
                                                selection.set(next.clone());
                                                load_strip(next, strip, strip_loading, strip_nonce);
                                            }
                                        >
                                            <option value="">"Random (All Sub-breeds)"</option>
                                            {subs
                                                .iter()
                                                .map(|sub| {
                                                    let sub = *sub;
                                                    view! {
                                                        <option
                                                            value=sub
                                                            selected=move || {
                                                                selection.get().sub_breed.as_deref() == Some(sub)
                                                            }
                                                        >
                                                            {dogs::display_name(sub)}
                                                        </option>
                                                    }
                                                })
                                                .collect_view()}
                                        </select>
                                    </label>
                                }
                            })
                    }}
                </div>

                {move || {
                    selection
                        .get()
                        .breed
                        .is_some()
                        .then(|| {
                            if strip_loading.get() {
                                return view! {
                                    <div style="margin-top: 12px; color: #9a9590; font-size: 0.85rem;">
                                        "Loading images\u{2026}"
                                    </div>
                                }
                                .into_any();
                            }
                            let images = strip.get();
                            if images.is_empty() {
                                return view! {
                                    <div style="margin-top: 12px; color: #9a9590; font-size: 0.85rem;">
                                        "No images available for this breed"
                                    </div>
                                }
                                .into_any();
                            }
                            view! {
                                <div style="margin-top: 12px; display: flex; gap: 8px; overflow-x: auto; padding-bottom: 8px;">
                                    {images
                                        .into_iter()
                                        .map(|url| {
                                            let src = url.clone();
                                            view! {
                                                <img
                                                    src=src
                                                    alt="Breed thumbnail"
                                                    style="height: 80px; border-radius: 4px; cursor: pointer; flex-shrink: 0;"
                                                    on:click=move |_| featured.set(Some(url.clone()))
                                                />
                                            }
                                        })
                                        .collect_view()}
                                </div>
                            }
                            .into_any()
                        })
                }}
            </div>

            {move || {
                featured
                    .get()
                    .map(|url| {
                        view! {
                            <div style="text-align: center; padding: 16px; background: #13161f; border: 1px solid #282c3e; border-radius: 8px;">
                                <h2 style="margin-top: 0;">"Random Dog"</h2>
                                <img
                                    src=url
                                    alt="Random Dog"
                                    style="max-width: 100%; max-height: 480px; border-radius: 8px;"
                                />
                                <div>
                                    <button
                                        style="margin-top: 12px; background: #f5c542; color: #13161f; border: none; border-radius: 6px; padding: 8px 16px; font-weight: 600; cursor: pointer;"
                                        on:click=move |_| {
                                            load_random(
                                                selection.get_untracked(),
                                                featured,
                                                featured_nonce,
                                            );
                                        }
                                    >
                                        "Get Random Dog"
                                    </button>
                                </div>
                            </div>
                        }
                    })
            }}
        </div>
    }
}
