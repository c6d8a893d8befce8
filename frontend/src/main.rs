use backoffice_frontend::{App, client_config, logging};
use leptos::prelude::*;

// 使用 lol_alloc 作为全局分配器，减小 WASM 体积
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    console_error_panic_hook::set_once();

    let config = client_config();
    logging::init(config.log_level);
    tracing::info!(api_url = %config.api_url, "starting backoffice");

    mount_to_body(App);
}
