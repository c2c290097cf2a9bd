mod app_config;
mod boot;
mod input;
mod page_core;
mod yew_app;

use boot::BootPhase;
use page_core::PageCore;

fn main() {
    console_error_panic_hook::set_once();
    boot::phase(BootPhase::Options);
    let tuning = app_config::tuning();
    if tuning.verbose {
        gloo::console::log!(
            "page options",
            format!("{:?}", tuning.dodge),
            format!("{:?}", tuning.burst)
        );
    }
    boot::phase(BootPhase::Mount);
    yew_app::run(PageCore::new(tuning));
}
