use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::path;

use crate::config;
use crate::leaderboard::LeaderboardView;
use crate::user::UserBreakdownView;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router base=config::router_base()>
            <main class="min-h-screen bg-gradient-to-b from-yellow-50 to-white p-8">
                <div class="max-w-5xl mx-auto">
                    <Routes fallback=|| view! { <NotFound /> }>
                        <Route path=path!("/") view=LeaderboardView />
                        <Route path=path!("/user/:address") view=UserBreakdownView />
                    </Routes>
                    <div class="text-center text-sm text-gray-500 mt-8">
                        "Built with Rust 🦀 + WebAssembly + Leptos"
                    </div>
                </div>
            </main>
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="bg-white rounded-lg shadow-lg p-6 text-center space-y-4">
            <h1 class="text-2xl font-bold text-gray-800">"Page not found"</h1>
            <A href="/">
                <span class="text-yellow-700 hover:underline">"Back to leaderboard"</span>
            </A>
        </div>
    }
}
