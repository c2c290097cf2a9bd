use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::timers::callback::Timeout;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Event, MouseEvent, PointerEvent, TouchEvent};
use yew::prelude::*;

use crate::boot::{self, BootFailure};
use crate::input::{first_touch_point, measure_layout, pointer_point, viewport_size};
use crate::page_core::PageCore;
use valentine_core::{Action, Particle};

const ROOT_ID: &str = "valentine-root";
const TITLE: &str = "Will you be my Valentine? 💌";
const SUBTITLE: &str = "I promise snacks, good vibes, and a lot of “I’m proud of you” energy 🥺🌷";
const FOOTER: &str = "Made with extra cute energy";

#[derive(Properties)]
pub(crate) struct AppProps {
    pub(crate) core: Rc<PageCore>,
}

impl PartialEq for AppProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }
}

#[derive(Clone)]
struct PlayRefs {
    area: NodeRef,
    yes: NodeRef,
    no: NodeRef,
}

impl PlayRefs {
    fn measure(&self) -> Option<valentine_core::Layout> {
        measure_layout(&self.area, &self.no, &self.yes)
    }
}

fn heart_style(heart: &Particle) -> String {
    format!(
        "left:{:.1}px;top:{:.1}px;font-size:{:.1}px;animation-duration:{:.0}ms;animation-delay:{:.0}ms;--drift:{:.1}px",
        heart.origin.x, heart.origin.y, heart.size, heart.duration_ms, heart.delay_ms, heart.drift
    )
}

#[function_component(App)]
pub(crate) fn app(props: &AppProps) -> Html {
    let core = props.core.clone();
    let snapshot = use_state(|| core.snapshot());
    let refs = PlayRefs {
        area: use_node_ref(),
        yes: use_node_ref(),
        no: use_node_ref(),
    };

    {
        let core = core.clone();
        let snapshot = snapshot.clone();
        use_effect_with((), move |_| {
            let core_for_cb = core.clone();
            let subscription = core.subscribe(Rc::new(move || {
                snapshot.set(core_for_cb.snapshot());
            }));
            boot::ready();
            move || {
                drop(subscription);
                core.cancel_timers();
            }
        });
    }

    {
        let core = core.clone();
        let refs = refs.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window available");
            let listener = EventListener::new(&window, "pointermove", move |event: &Event| {
                let Some(event) = event.dyn_ref::<PointerEvent>() else {
                    return;
                };
                let at = pointer_point(event);
                let layout = if core.is_accepted() { None } else { refs.measure() };
                core.dispatch(Action::PointerMoved { at, layout });
            });
            || drop(listener)
        });
    }

    {
        let core = core.clone();
        let refs = refs.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window available");
            let settle: Rc<dyn Fn()> = Rc::new(move || {
                if let Some(layout) = refs.measure() {
                    core.dispatch(Action::LayoutSettled { layout });
                }
            });
            let settle_now = settle.clone();
            let first_pass = Timeout::new(0, move || settle_now());
            let resize = EventListener::new(&window, "resize", move |_| settle());
            move || {
                drop(first_pass);
                drop(resize);
            }
        });
    }

    {
        let core = core.clone();
        let refs = refs.clone();
        use_effect_with((), move |_| {
            let listener = refs.no.cast::<web_sys::Element>().map(|button| {
                let refs = refs.clone();
                EventListener::new_with_options(
                    &button,
                    "touchstart",
                    EventListenerOptions {
                        phase: EventListenerPhase::Bubble,
                        passive: false,
                    },
                    move |event: &Event| {
                        let Some(event) = event.dyn_ref::<TouchEvent>() else {
                            return;
                        };
                        let Some(at) = first_touch_point(event) else {
                            return;
                        };
                        let layout = refs.measure();
                        if core.dispatch(Action::DeclineContact { at, layout }) {
                            event.prevent_default();
                            event.stop_propagation();
                        }
                    },
                )
            });
            move || drop(listener)
        });
    }

    let on_yes = {
        let core = core.clone();
        Callback::from(move |_: MouseEvent| {
            let viewport = viewport_size().unwrap_or_default();
            core.dispatch(Action::Accept { viewport });
        })
    };

    let on_no = {
        let core = core.clone();
        let refs = refs.clone();
        Callback::from(move |event: MouseEvent| {
            let viewport = viewport_size().unwrap_or_default();
            let layout = if core.is_accepted() { None } else { refs.measure() };
            if core.dispatch(Action::DeclinePressed { viewport, layout }) {
                event.prevent_default();
                event.stop_propagation();
            }
        })
    };

    let accepted = snapshot.accepted();
    let no_style = snapshot
        .decline
        .map(|pos| format!("--x:{:.2}px;--y:{:.2}px", pos.x, pos.y));
    let hearts: Html = snapshot
        .hearts
        .iter()
        .map(|heart| {
            html! {
                <span key={heart.id.to_string()} class="heart" style={heart_style(heart)}>
                    { heart.glyph }
                </span>
            }
        })
        .collect();

    html! {
        <div class="page">
            <div class="bg-glow" aria-hidden="true" />
            <div class="hearts-layer" aria-hidden="true">{ hearts }</div>
            <main class="card">
                <div class="title">
                    <span class="sparkle">{ "✨" }</span>
                    <h1>{ TITLE }</h1>
                    <span class="sparkle">{ "✨" }</span>
                </div>
                <p class="subtitle">{ SUBTITLE }</p>
                <div class="actions-area" ref={refs.area.clone()}>
                    <button
                        ref={refs.yes.clone()}
                        class="btn yes"
                        onclick={on_yes}
                        disabled={accepted}
                        aria-label="Yes"
                    >
                        { "Yes 💖" }
                    </button>
                    <button
                        ref={refs.no.clone()}
                        class={classes!("btn", "no", snapshot.decline.is_some().then_some("placed"))}
                        onclick={on_no}
                        disabled={accepted}
                        style={no_style}
                        aria-label="No"
                    >
                        { "No 🙅‍♀️💔" }
                    </button>
                </div>
                <div class={classes!("message", accepted.then_some("show"))} aria-live="polite">
                    { snapshot.confirmation.unwrap_or_default() }
                </div>
                <div class="footer">
                    <span>{ "💞" }</span>
                    <span>{ FOOTER }</span>
                    <span>{ "💞" }</span>
                </div>
            </main>
        </div>
    }
}

pub(crate) fn run(core: Rc<PageCore>) {
    let Some(root) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(ROOT_ID))
    else {
        boot::fail(BootFailure::MissingRoot, "no mount point for the page");
        return;
    };
    yew::Renderer::<App>::with_root_and_props(root, AppProps { core }).render();
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use console_error_panic_hook::set_once as set_panic_hook;
    use gloo::timers::future::TimeoutFuture;
    use js_sys::Date;
    use valentine_core::{Phase, Tuning, CONFIRMATION_TEXT};
    use wasm_bindgen_test::*;
    use web_sys::{Element, HtmlElement};

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount(id: &str, core: Rc<PageCore>) -> Element {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document available");
        let root = document.create_element("div").expect("create test root");
        root.set_id(id);
        document
            .body()
            .expect("body available")
            .append_child(&root)
            .expect("append test root");
        yew::Renderer::<App>::with_root_and_props(root.clone(), AppProps { core }).render();
        root
    }

    async fn wait_until(label: &str, mut check: impl FnMut() -> bool) {
        let start = Date::now();
        while !check() {
            if Date::now() - start > 3000.0 {
                panic!("{label} not reached after 3s");
            }
            TimeoutFuture::new(10).await;
        }
    }

    fn click(root: &Element, selector: &str) {
        root.query_selector(selector)
            .expect("valid selector")
            .expect("element rendered")
            .dyn_into::<HtmlElement>()
            .expect("html element")
            .click();
    }

    fn count(root: &Element, selector: &str) -> u32 {
        root.query_selector_all(selector)
            .map(|list| list.length())
            .unwrap_or(0)
    }

    #[wasm_bindgen_test(async)]
    async fn accept_shows_message_and_hearts() {
        set_panic_hook();
        let core = PageCore::new(Tuning::default());
        let root = mount("accept-test-root", core.clone());
        wait_until("decline placed", || core.snapshot().decline.is_some()).await;

        assert_eq!(count(&root, ".heart"), 0);
        assert_eq!(count(&root, ".message.show"), 0);

        click(&root, ".yes");
        wait_until("hearts rendered", || count(&root, ".heart") == 70).await;
        let message = root
            .query_selector(".message.show")
            .expect("valid selector")
            .expect("message visible");
        assert_eq!(message.text_content().as_deref(), Some(CONFIRMATION_TEXT));
        assert_eq!(core.pending_cleanups(), 1);

        click(&root, ".yes");
        TimeoutFuture::new(20).await;
        assert_eq!(count(&root, ".heart"), 70);
        assert_eq!(core.pending_cleanups(), 1);
        core.cancel_timers();
    }

    #[wasm_bindgen_test(async)]
    async fn decline_press_never_accepts() {
        set_panic_hook();
        let core = PageCore::new(Tuning::default());
        let root = mount("decline-test-root", core.clone());
        wait_until("decline placed", || core.snapshot().decline.is_some()).await;

        click(&root, ".no");
        TimeoutFuture::new(20).await;
        let snapshot = core.snapshot();
        assert_eq!(snapshot.phase, Phase::Undecided);
        assert!(snapshot.hearts.is_empty());
        assert_eq!(count(&root, ".message.show"), 0);
        assert_eq!(count(&root, ".no.placed"), 1);
    }
}
