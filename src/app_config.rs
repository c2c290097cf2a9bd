use std::cell::RefCell;

use web_sys::UrlSearchParams;

use valentine_core::{Tuning, TUNING_KEYS};

thread_local! {
    static PAGE_TUNING: RefCell<Option<Tuning>> = RefCell::new(None);
}

fn store_tuning(tuning: Tuning) {
    PAGE_TUNING.with(|slot| {
        *slot.borrow_mut() = Some(tuning);
    });
}

pub(crate) fn tuning() -> Tuning {
    if let Some(tuning) = PAGE_TUNING.with(|slot| *slot.borrow()) {
        return tuning;
    }
    let tuning = load_tuning();
    store_tuning(tuning);
    tuning
}

/// Defaults overridden by the page query string, e.g. `?hearts=120&verbose`.
fn load_tuning() -> Tuning {
    let mut tuning = Tuning::default();
    let Some(params) = query_params() else {
        return tuning;
    };
    for key in TUNING_KEYS {
        let Some(raw) = params.get(key) else {
            continue;
        };
        if let Err(err) = tuning.apply_override(key, &raw) {
            gloo::console::warn!("ignoring page option", err.to_string());
        }
    }
    tuning
}

fn query_params() -> Option<UrlSearchParams> {
    let window = web_sys::window()?;
    let search = window.location().search().ok()?;
    UrlSearchParams::new_with_str(&search).ok()
}
