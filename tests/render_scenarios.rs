use std::sync::{Arc, Mutex};

use qirender::{
    BitMatrix, Dimension, ModuleMatrix, ModuleSizeRenderer, PropertyChange, RenderError,
    Renderable, SizeFittingRenderer, Topic, TriState,
};
use test_log::test;

fn finder_like(size: u32) -> BitMatrix {
    BitMatrix::from_fn(size, size, |x, y| {
        let corner = |c: u32| c < 7;
        (corner(x) && corner(y)) || (x + 2 * y) % 5 == 0
    })
}

fn assert_symbol_at(bitmap: &qirender::Bitmap, matrix: &BitMatrix, multiple: u32, left: u32, top: u32) {
    for y in 0..matrix.height() {
        for x in 0..matrix.width() {
            let px = left + x * multiple;
            let py = top + y * multiple;
            assert_eq!(bitmap.get(px, py), matrix.is_dark(x, y), "module ({}, {})", x, y);
            assert_eq!(
                bitmap.get(px + multiple - 1, py + multiple - 1),
                matrix.is_dark(x, y)
            );
        }
    }
}

#[test]
fn version1_fits_into_120() {
    let matrix = finder_like(21);
    let mut renderer = SizeFittingRenderer::new();
    renderer
        .set_requested_dimension(Dimension::square(120).unwrap())
        .unwrap();
    let bitmap = renderer.render(&matrix).unwrap().clone();
    assert_eq!(bitmap.dimension(), Dimension::square(120).unwrap());
    assert_eq!(renderer.derived_module_size(), Some(4));
    assert_symbol_at(&bitmap, &matrix, 4, 18, 18);
    // nothing outside the symbol
    for i in 0..120 {
        assert!(!bitmap.get(i, 17) && !bitmap.get(17, i));
        assert!(!bitmap.get(i, 102) && !bitmap.get(102, i));
    }
}

#[test]
fn fitted_output_never_smaller_than_request_or_symbol() {
    for size in [21u32, 25, 33, 57, 101] {
        let matrix = finder_like(size);
        for (w, h) in [(29u32, 29u32), (29, 300), (120, 120), (257, 64), (500, 499)] {
            let request = Dimension::new(w, h).unwrap();
            let mut renderer = SizeFittingRenderer::new();
            renderer.set_requested_dimension(request).unwrap();
            let actual = renderer.render(&matrix).unwrap().dimension();
            assert!(actual.width() >= request.width() && actual.height() >= request.height());
            assert!(actual.width() >= size + 8 && actual.height() >= size + 8);
            let expected = TriState::from(actual.exceeds(&request));
            assert_eq!(renderer.exceeds_requested_dimension(), expected);
        }
    }
}

#[test]
fn module_size_three_is_87_without_padding() {
    let matrix = finder_like(21);
    let mut renderer = ModuleSizeRenderer::new();
    renderer.set_module_size(3).unwrap();
    let bitmap = renderer.render(&matrix).unwrap().clone();
    assert_eq!(bitmap.dimension(), Dimension::square(87).unwrap());
    assert_eq!(renderer.actual_dimension(), Some(Dimension::square(87).unwrap()));
    // symbol sits inside the quiet zone: 4 modules of 3px
    assert_symbol_at(&bitmap, &matrix, 3, 12, 12);
}

#[test]
fn module_size_matches_footprint_exactly() {
    let matrix = BitMatrix::from_fn(33, 25, |x, _| x % 2 == 0);
    let mut renderer = ModuleSizeRenderer::new();
    for module_size in 1..=6 {
        renderer.set_module_size(module_size).unwrap();
        let actual = renderer.render(&matrix).unwrap().dimension();
        assert_eq!(
            actual,
            Dimension::new(41 * module_size, 33 * module_size).unwrap()
        );
    }
}

#[test]
fn exceeding_ceiling_reports_both_dimensions() {
    let ceiling = Dimension::square(50).unwrap();
    let mut renderer = ModuleSizeRenderer::with_max_image_dimension(ceiling);
    renderer.set_module_size(1).unwrap();
    renderer.render(&finder_like(21)).unwrap();
    assert!(renderer.has_result());

    renderer.set_module_size(2).unwrap();
    let err = renderer.render(&finder_like(21)).unwrap_err();
    match err {
        RenderError::SizeExceeded { max, actual } => {
            assert_eq!(max, ceiling);
            assert_eq!(actual, Dimension::square(58).unwrap());
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(!renderer.has_result());
    assert!(renderer.result().is_none());
    assert_eq!(renderer.actual_dimension(), None);
    assert_eq!(renderer.max_image_dimension(), ceiling);
}

#[test]
fn failed_render_clears_result_left_by_previous_render() {
    let ceiling = Dimension::square(100).unwrap();
    let mut renderer = ModuleSizeRenderer::with_max_image_dimension(ceiling);
    renderer.set_module_size(2).unwrap();
    renderer.render(&finder_like(21)).unwrap();

    let cleared = Arc::new(Mutex::new(false));
    let c = Arc::clone(&cleared);
    renderer.add_listener(
        Topic::Result,
        Box::new(move |change| {
            if let PropertyChange::Result { old, new } = change {
                *c.lock().unwrap() = old.is_some() && new.is_none();
            }
        }),
    );
    // a larger matrix at the same module size overflows the ceiling
    assert!(renderer.render(&finder_like(45)).is_err());
    assert!(*cleared.lock().unwrap());
    assert!(!renderer.has_result());
}

#[test]
fn rendering_twice_is_bit_identical() {
    let matrix = finder_like(29);
    let mut fitting = SizeFittingRenderer::new();
    fitting
        .set_requested_dimension(Dimension::new(203, 150).unwrap())
        .unwrap();
    let first = fitting.render(&matrix).unwrap().clone();
    let second = fitting.render(&matrix).unwrap().clone();
    assert_eq!(first, second);

    let mut by_module = ModuleSizeRenderer::new();
    let first = by_module.render(&matrix).unwrap().clone();
    let second = by_module.render(&matrix).unwrap().clone();
    assert_eq!(first, second);
}

#[test]
fn unchanged_setters_fire_nothing_and_keep_result() {
    let matrix = finder_like(21);
    let count = Arc::new(Mutex::new(0));

    let mut fitting = SizeFittingRenderer::new();
    fitting.render(&matrix).unwrap();
    let c = Arc::clone(&count);
    fitting.add_listener_all(Box::new(move |_| *c.lock().unwrap() += 1));
    let current = fitting.requested_dimension().unwrap();
    fitting.set_requested_dimension(current).unwrap();
    assert!(fitting.has_result());

    let mut by_module = ModuleSizeRenderer::new();
    by_module.render(&matrix).unwrap();
    let c = Arc::clone(&count);
    by_module.add_listener_all(Box::new(move |_| *c.lock().unwrap() += 1));
    let current = by_module.module_size().unwrap();
    by_module.set_module_size(current).unwrap();
    assert!(by_module.has_result());

    assert_eq!(*count.lock().unwrap(), 0);
}

#[test]
fn changed_setters_reset_until_next_render() {
    let matrix = finder_like(21);
    let mut fitting = SizeFittingRenderer::new();
    fitting.render(&matrix).unwrap();
    fitting
        .set_requested_dimension(Dimension::square(64).unwrap())
        .unwrap();
    assert!(!fitting.has_result());
    fitting.render(&matrix).unwrap();
    assert!(fitting.has_result());

    let mut by_module = ModuleSizeRenderer::new();
    by_module.render(&matrix).unwrap();
    by_module.set_module_size(7).unwrap();
    assert!(!by_module.has_result());
    assert_eq!(by_module.actual_dimension(), None);
}

#[test]
fn first_render_notifies_each_property_with_old_and_new() {
    let changes: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let mut renderer = SizeFittingRenderer::new();
    let c = Arc::clone(&changes);
    renderer.add_listener_all(Box::new(move |change| {
        let line = match change {
            PropertyChange::ModuleSize { old, new } => format!("moduleSize {:?}->{:?}", old, new),
            PropertyChange::ActualDimension { old, new } => {
                format!("actualDimension {:?}->{}", old, new.map(|d| d.to_string()).unwrap_or_default())
            }
            PropertyChange::Result { old, new } => {
                format!("result {}->{}", old.is_some(), new.is_some())
            }
            other => other.topic().name().to_string(),
        };
        c.lock().unwrap().push(line);
    }));
    renderer.render(&finder_like(21)).unwrap();
    assert_eq!(
        *changes.lock().unwrap(),
        vec![
            "moduleSize None->Some(4)".to_string(),
            "actualDimension None->120x120".to_string(),
            "result false->true".to_string(),
        ]
    );
}

#[test]
fn large_symbol_exceeds_small_request() {
    let mut renderer = SizeFittingRenderer::new();
    renderer
        .set_requested_dimension(Dimension::square(40).unwrap())
        .unwrap();
    let topic_hits = Arc::new(Mutex::new(Vec::new()));
    let t = Arc::clone(&topic_hits);
    let id = renderer.add_listener(
        Topic::ExceedsRequestedDimension,
        Box::new(move |change| {
            if let PropertyChange::ExceedsRequestedDimension { old, new } = change {
                t.lock().unwrap().push((*old, *new));
            }
        }),
    );
    renderer.render(&finder_like(57)).unwrap();
    assert_eq!(renderer.exceeds_requested_dimension(), TriState::True);
    assert_eq!(renderer.actual_dimension(), Some(Dimension::square(65).unwrap()));
    renderer.reset_state();
    assert_eq!(renderer.exceeds_requested_dimension(), TriState::False);
    assert_eq!(
        *topic_hits.lock().unwrap(),
        vec![
            (TriState::False, TriState::True),
            (TriState::True, TriState::False)
        ]
    );

    assert!(renderer.remove_listener(id));
    renderer.render(&finder_like(57)).unwrap();
    assert_eq!(topic_hits.lock().unwrap().len(), 2);
}

#[test]
fn strategies_share_one_interface() {
    let matrix = finder_like(21);
    let mut renderers: Vec<Box<dyn Renderable>> = vec![
        Box::new(SizeFittingRenderer::new()),
        Box::new(ModuleSizeRenderer::new()),
    ];
    for renderer in renderers.iter_mut() {
        assert!(!renderer.has_result());
        let dimension = renderer.render(&matrix).unwrap().dimension();
        assert_eq!(renderer.actual_dimension(), Some(dimension));
    }
    assert!(renderers[0].module_size().is_err());
    assert!(renderers[1].requested_dimension().is_err());
    assert_eq!(
        renderers[1].exceeds_requested_dimension(),
        TriState::NotApplicable
    );
}

#[test]
fn renderer_behind_mutex_renders_on_another_thread() {
    let shared = Arc::new(Mutex::new(ModuleSizeRenderer::new()));
    let seen = Arc::new(Mutex::new(Vec::new()));
    {
        let seen = Arc::clone(&seen);
        shared.lock().unwrap().add_listener(
            Topic::ActualDimension,
            Box::new(move |change| {
                if let PropertyChange::ActualDimension { new, .. } = change {
                    seen.lock().unwrap().push(*new);
                }
            }),
        );
    }

    let worker = {
        let shared = Arc::clone(&shared);
        std::thread::spawn(move || {
            let mut renderer = shared.lock().unwrap();
            renderer.set_module_size(2).unwrap();
            let bitmap = renderer.render(&finder_like(21)).unwrap();
            bitmap.dimension()
        })
    };
    let rendered = worker.join().unwrap();

    assert_eq!(rendered, Dimension::square(58).unwrap());
    assert!(shared.lock().unwrap().has_result());
    assert_eq!(*seen.lock().unwrap(), vec![Some(Dimension::square(58).unwrap())]);
}
