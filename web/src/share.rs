//! Share modal: card preview, PNG download and the tweet intent.

use leptos::prelude::*;
use leptos::task::spawn_local;
use sparks_shared::share::{CARD_HEIGHT, CARD_WIDTH};
use sparks_shared::{Error, ShareCard};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement,
    HtmlImageElement, Url,
};

// PNG is rendered at twice the card size.
const EXPORT_SCALE: u32 = 2;

#[component]
pub fn ShareModal(card: ShareCard, on_close: Callback<()>) -> impl IntoView {
    let (notice, set_notice) = signal(None::<String>);
    let (exporting, set_exporting) = signal(false);
    let svg = card.to_svg();

    let download = {
        let card = card.clone();
        move |_| {
            let card = card.clone();
            set_exporting.set(true);
            spawn_local(async move {
                if let Err(err) = export_png(&card).await {
                    web_sys::console::error_1(&err.to_string().into());
                    set_notice.set(Some(err.to_string()));
                }
                set_exporting.set(false);
            });
        }
    };

    let share = move |_| {
        if let Err(err) = open_intent(&card) {
            set_notice.set(Some(err.to_string()));
        }
    };

    view! {
        <div
            class="fixed inset-0 bg-black/50 flex items-center justify-center p-4 z-50"
            on:click=move |_| on_close.run(())
        >
            <div
                class="bg-white rounded-lg shadow-xl p-6 max-w-[650px] w-full space-y-6"
                on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()
            >
                <div class="flex justify-between items-center">
                    <h2 class="text-xl font-semibold text-yellow-900">"Share Your Sparks 🔥"</h2>
                    <button class="text-gray-500 hover:text-gray-800" on:click=move |_| on_close.run(())>
                        "✕"
                    </button>
                </div>
                <div class="flex justify-center overflow-x-auto" inner_html=svg></div>
                {move || {
                    notice
                        .get()
                        .map(|msg| {
                            view! {
                                <div class="p-3 bg-red-100 border border-red-400 text-red-700 rounded flex justify-between gap-4">
                                    <span>{msg} " Try again."</span>
                                    <button class="font-semibold" on:click=move |_| set_notice.set(None)>
                                        "Dismiss"
                                    </button>
                                </div>
                            }
                        })
                }}
                <div class="grid grid-cols-2 gap-3">
                    <button
                        class="bg-gray-800 text-white px-4 py-2 rounded hover:bg-gray-900 disabled:opacity-50"
                        disabled=exporting
                        on:click=download
                    >
                        {move || if exporting.get() { "Exporting…" } else { "Download image" }}
                    </button>
                    <button
                        class="bg-yellow-500 text-white px-4 py-2 rounded hover:bg-yellow-600 font-semibold"
                        on:click=share
                    >
                        "Share on Twitter"
                    </button>
                </div>
            </div>
        </div>
    }
}

fn js_failure(step: &str, err: JsValue) -> Error {
    Error::ShareExportFailure(format!("{step}: {err:?}"))
}

/// Draw the card's SVG onto a canvas and download it as PNG.
pub async fn export_png(card: &ShareCard) -> Result<(), Error> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| Error::ShareExportFailure("no document".to_string()))?;

    let parts = js_sys::Array::of1(&JsValue::from_str(&card.to_svg()));
    let options = BlobPropertyBag::new();
    options.set_type("image/svg+xml;charset=utf-8");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|e| js_failure("building the image", e))?;
    let svg_url =
        Url::create_object_url_with_blob(&blob).map_err(|e| js_failure("building the image", e))?;

    let result = render_png(&document, &svg_url).await;
    if let Err(e) = Url::revoke_object_url(&svg_url) {
        web_sys::console::warn_2(&"failed to release the card image URL".into(), &e);
    }
    let png_url = result?;

    let link: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| js_failure("preparing the download", e))?
        .unchecked_into();
    link.set_href(&png_url);
    link.set_download(&card.file_name("png"));
    link.click();
    Ok(())
}

async fn render_png(document: &web_sys::Document, svg_url: &str) -> Result<String, Error> {
    let img = HtmlImageElement::new().map_err(|e| js_failure("loading the card", e))?;
    img.set_src(svg_url);
    JsFuture::from(img.decode())
        .await
        .map_err(|e| js_failure("loading the card", e))?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| js_failure("creating the canvas", e))?
        .unchecked_into();
    canvas.set_width(CARD_WIDTH * EXPORT_SCALE);
    canvas.set_height(CARD_HEIGHT * EXPORT_SCALE);

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| js_failure("creating the canvas", e))?
        .ok_or_else(|| Error::ShareExportFailure("2d canvas unsupported".to_string()))?
        .unchecked_into();
    let scale = f64::from(EXPORT_SCALE);
    ctx.scale(scale, scale)
        .map_err(|e| js_failure("drawing the card", e))?;
    ctx.draw_image_with_html_image_element(&img, 0.0, 0.0)
        .map_err(|e| js_failure("drawing the card", e))?;

    canvas
        .to_data_url_with_type("image/png")
        .map_err(|e| js_failure("encoding the PNG", e))
}

/// Open the pre-filled tweet in a new tab.
pub fn open_intent(card: &ShareCard) -> Result<(), Error> {
    let window = web_sys::window()
        .ok_or_else(|| Error::ShareExportFailure("no window".to_string()))?;
    match window.open_with_url_and_target(&card.intent_url(), "_blank") {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(Error::ShareExportFailure(
            "the share window was blocked by the browser".to_string(),
        )),
        Err(e) => Err(js_failure("opening the share window", e)),
    }
}
