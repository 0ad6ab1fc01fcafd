use super::*;

fn comp() -> Composition {
    Composition::from_json_str(
        r#"{
          "fps": 30,
          "durationFrames": 120,
          "scenes": [
            { "id": "a", "startFrame": 0, "durationFrames": 60, "visual": { "type": "image", "src": "a.png" } },
            { "id": "b", "startFrame": 60, "durationFrames": 50,
              "visual": { "type": "diagram", "diagram": { "type": "timeline",
                "events": [{ "label": "1900" }, { "label": "1950" }] } } }
          ]
        }"#,
    )
    .unwrap()
}

fn range(start: u64, end: u64) -> FrameRange {
    FrameRange::new(FrameIndex(start), FrameIndex(end)).unwrap()
}

#[test]
fn serial_batch_matches_single_frames() {
    let c = comp();
    let states = eval_frames(&c, range(10, 20), &BatchOpts::default(), None).unwrap();
    assert_eq!(states.len(), 10);
    for (i, s) in states.iter().enumerate() {
        assert_eq!(s.frame, FrameIndex(10 + i as u64));
        assert_eq!(*s, Evaluator::eval_frame(&c, s.frame));
    }
}

#[test]
fn parallel_batch_matches_serial() {
    let c = comp();
    let serial = eval_frames(&c, range(0, 120), &BatchOpts::default(), None).unwrap();
    let opts = BatchOpts {
        parallel: true,
        threads: Some(3),
        chunk_size: 7,
    };
    let parallel = eval_frames(&c, range(0, 120), &opts, None).unwrap();
    assert_eq!(serial, parallel);
}

#[test]
fn zero_chunk_size_is_one() {
    assert_eq!(normalized_chunk_size(0), 1);
    assert_eq!(normalized_chunk_size(64), 64);
    let opts = BatchOpts {
        parallel: true,
        threads: Some(1),
        chunk_size: 0,
    };
    assert_eq!(eval_frames(&comp(), range(0, 5), &opts, None).unwrap().len(), 5);
}

#[test]
fn zero_threads_is_rejected() {
    let opts = BatchOpts {
        parallel: true,
        threads: Some(0),
        chunk_size: 8,
    };
    let err = eval_frames(&comp(), range(0, 5), &opts, None).unwrap_err();
    assert!(err.to_string().contains("threads"));
}

#[test]
fn empty_range_yields_nothing() {
    let opts = BatchOpts {
        parallel: true,
        ..BatchOpts::default()
    };
    assert!(eval_frames(&comp(), range(5, 5), &opts, None).unwrap().is_empty());
}
