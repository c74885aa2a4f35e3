use leptos::prelude::*;

use crate::app::{CurrentPage, Page};

#[component]
pub fn Home() -> impl IntoView {
    view! {
        <div>
            <div style="text-align: center; margin-bottom: 32px;">
                <h1 style="margin-bottom: 4px;">"Welcome to AllAPIs"</h1>
                <p style="color: #9a9590;">"Explore various APIs and integrations in one place"</p>
            </div>
            <div style="display: grid; grid-template-columns: repeat(auto-fit, minmax(240px, 1fr)); gap: 16px;">
                <FeatureCard
                    page=Page::SpaceImages
                    icon="\u{1F6F0}\u{FE0F}"
                    title="Space Images"
                    blurb="Browse NASA's Global Imagery Browse Services (GIBS) - access Earth observation imagery and satellite data"
                />
                <FeatureCard
                    page=Page::Dogs
                    icon="\u{1F436}"
                    title="Dogs"
                    blurb="Get random dog images from the Dog CEO API"
                />
                <FeatureCard
                    page=Page::ColorPalette
                    icon="\u{1F3A8}"
                    title="Color Palettes"
                    blurb="Generate five-color palettes with the Colormind API"
                />
            </div>
            <div style="margin-top: 32px; padding: 16px; background: #13161f; border: 1px solid #282c3e; border-radius: 8px;">
                <h2 style="margin-top: 0;">"About This Project"</h2>
                <p style="color: #9a9590; margin-bottom: 0;">
                    "AllAPIs is a centralized platform for exploring and integrating with various APIs. \
                     Each section provides tools and interfaces to interact with different services."
                </p>
            </div>
        </div>
    }
}

#[component]
fn FeatureCard(
    page: Page,
    icon: &'static str,
    title: &'static str,
    blurb: &'static str,
) -> impl IntoView {
    let CurrentPage(current) = expect_context();

    view! {
        <div
            style="padding: 20px; background: #13161f; border: 1px solid #282c3e; border-radius: 8px; cursor: pointer;"
            on:click=move |_| current.set(page)
        >
            <div style="font-size: 1.6rem;">{icon}</div>
            <h2 style="margin: 8px 0 4px 0;">{title}</h2>
            <p style="color: #9a9590; font-size: 0.85rem;">{blurb}</p>
            <span style="color: #f5c542; font-size: 0.85rem;">"Explore \u{2192}"</span>
        </div>
    }
}
