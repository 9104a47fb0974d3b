use leptos::html::Canvas;
use leptos::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{AnimationFrame, request_animation_frame};

use crate::{
    application::{ChartViewer, DisplaySurface, LoopSignal},
    domain::{
        chart::{CanvasSize, ScreenPoint},
        events::{InputEvent, Key, PointerButton, ScrollDirection},
        logging::{LogComponent, get_logger},
    },
    event_utils::{ListenerOptions, WindowListener, listen_window},
    infrastructure::{input::QueuedInput, rendering::CanvasSurface},
};

/// Shared state of the requestAnimationFrame loop
struct FrameLoop {
    viewer: Rc<RefCell<ChartViewer>>,
    input: QueuedInput,
    surface: RefCell<CanvasSurface>,
    pending: RefCell<Option<AnimationFrame>>,
}

impl FrameLoop {
    fn schedule(self: &Rc<Self>) {
        let next = Rc::clone(self);
        let handle = request_animation_frame(move |_timestamp| next.tick());
        *self.pending.borrow_mut() = Some(handle);
    }

    fn tick(self: Rc<Self>) {
        let mut viewer = self.viewer.borrow_mut();
        let mut input = self.input.clone();
        let mut surface = self.surface.borrow_mut();

        match viewer.frame(&mut input, &mut *surface) {
            LoopSignal::Continue => {
                drop(surface);
                drop(viewer);
                self.schedule();
            }
            LoopSignal::Terminate => {
                viewer.shutdown(&mut *surface);
                self.pending.borrow_mut().take();
            }
        }
    }
}

fn start_frame_loop(viewer: Rc<RefCell<ChartViewer>>, input: QueuedInput, mut surface: CanvasSurface) {
    {
        let viewer_ref = viewer.borrow();
        if let Err(e) = surface.open(viewer_ref.title(), viewer_ref.viewport().canvas()) {
            get_logger().error(LogComponent::Presentation("ViewerApp"), &e.to_string());
            return;
        }
    }

    let frame_loop = Rc::new(FrameLoop {
        viewer,
        input,
        surface: RefCell::new(surface),
        pending: RefCell::new(None),
    });
    frame_loop.schedule();
}

fn pointer_at(ev: &web_sys::MouseEvent) -> ScreenPoint {
    ScreenPoint::new(ev.offset_x() as f64, ev.offset_y() as f64)
}

/// Chart canvas bound to a viewer. Browser events are queued as
/// `InputEvent`s and drained once per animation frame.
#[component]
pub fn ViewerApp(viewer: Rc<RefCell<ChartViewer>>, canvas: CanvasSize) -> impl IntoView {
    let input = QueuedInput::new();
    let canvas_ref = create_node_ref::<Canvas>();
    let started = Rc::new(Cell::new(false));

    {
        let viewer = Rc::clone(&viewer);
        let input = input.clone();
        create_effect(move |_| {
            let Some(element) = canvas_ref.get() else { return };
            if started.replace(true) {
                return;
            }
            let html_canvas: &web_sys::HtmlCanvasElement = &element;
            match CanvasSurface::from_canvas(html_canvas.clone()) {
                Ok(surface) => start_frame_loop(Rc::clone(&viewer), input.clone(), surface),
                Err(e) => get_logger().error(LogComponent::Presentation("ViewerApp"), &e.to_string()),
            }
        });
    }

    let key_listeners: Vec<WindowListener> = vec![
        {
            let input = input.clone();
            listen_window(ev::keydown, ListenerOptions::default(), move |ev| {
                if !ev.repeat() {
                    input.push(InputEvent::KeyDown(Key::from_dom_code(&ev.code())));
                }
            })
        },
        {
            let input = input.clone();
            listen_window(ev::keyup, ListenerOptions::default(), move |ev| {
                input.push(InputEvent::KeyUp(Key::from_dom_code(&ev.code())));
            })
        },
    ];

    let close_listener = {
        let input = input.clone();
        EventListener::new(&gloo::utils::window(), "pagehide", move |_| input.push(InputEvent::Quit))
    };

    on_cleanup(move || {
        for listener in key_listeners {
            listener.remove();
        }
        drop(close_listener);
    });

    let on_wheel = {
        let input = input.clone();
        move |ev: ev::WheelEvent| {
            ev.prevent_default();
            input.set_pointer_position(pointer_at(&ev));
            // DOM deltaY grows downward
            let delta = -ev.delta_y();
            input.push(InputEvent::Scroll { direction: ScrollDirection::from_wheel(delta), delta });
        }
    };

    let on_mouse_down = {
        let input = input.clone();
        move |ev: ev::MouseEvent| {
            if let Some(button) = PointerButton::from_dom_button(ev.button()) {
                input.set_pointer_position(pointer_at(&ev));
                input.push(InputEvent::PointerDown(button));
            }
        }
    };

    let on_mouse_up = {
        let input = input.clone();
        move |ev: ev::MouseEvent| {
            if let Some(button) = PointerButton::from_dom_button(ev.button()) {
                input.push(InputEvent::PointerUp(button));
            }
        }
    };

    let on_mouse_move = {
        let input = input.clone();
        move |ev: ev::MouseEvent| {
            input.set_pointer_position(pointer_at(&ev));
            input.push(InputEvent::PointerMove { dx: ev.movement_x() as f64, dy: ev.movement_y() as f64 });
        }
    };

    let on_close = {
        let input = input.clone();
        move |_: ev::MouseEvent| input.push(InputEvent::Quit)
    };

    let title = viewer.borrow().title().to_string();

    view! {
        <div class="viewer">
            <div class="viewer-header">
                <span class="viewer-title">{title}</span>
                <button class="viewer-close" on:click=on_close>"Close"</button>
            </div>
            <canvas
                node_ref=canvas_ref
                width=canvas.width as u32
                height=canvas.height as u32
                style="display: block; cursor: crosshair;"
                on:wheel=on_wheel
                on:mousedown=on_mouse_down
                on:mouseup=on_mouse_up
                on:mousemove=on_mouse_move
                on:contextmenu=|ev: ev::MouseEvent| ev.prevent_default()
            />
        </div>
    }
}
