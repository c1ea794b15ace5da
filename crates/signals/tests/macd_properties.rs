use chrono::{DateTime, Duration, TimeZone, Utc};
use core_types::{Classification, Crossing, CrossingWindow, Series};
use signals::{Classifier, Error, MacdEngine, MacdSettings, ratio, relative_strength};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn daily(closes: &[f64]) -> Series {
    Series::from_closes(start(), Duration::days(1), closes)
}

fn engine() -> MacdEngine {
    MacdEngine::new(MacdSettings::default()).unwrap()
}

fn extended_engine() -> MacdEngine {
    MacdEngine::new(MacdSettings::default().with_window(CrossingWindow::Extended)).unwrap()
}

/// Flat at 10, a slow dip of `dip_bars` cents, then `tail` values.
fn dip_then(dip_bars: usize, tail: &[f64]) -> Vec<f64> {
    let mut closes = vec![10.0; 30];
    closes.extend((1..=dip_bars).map(|i| 10.0 - 0.01 * i as f64));
    closes.extend_from_slice(tail);
    closes
}

/// Flat at 10, a slow rise of `rise_bars` cents, then `tail` values.
fn rise_then(rise_bars: usize, tail: &[f64]) -> Vec<f64> {
    let mut closes = vec![10.0; 30];
    closes.extend((1..=rise_bars).map(|i| 10.0 + 0.01 * i as f64));
    closes.extend_from_slice(tail);
    closes
}

#[test]
fn short_series_is_never_classified() {
    let engine = engine();
    for len in 0..35 {
        let closes: Vec<f64> = (0..len)
            .map(|i| if i % 2 == 0 { 1.0 } else { 100.0 })
            .collect();
        let series = daily(&closes);
        assert_eq!(
            engine.classify(Some(&series)),
            Classification::Confirmed(Crossing::None),
            "len {len}"
        );
        assert_eq!(
            engine.evaluate(&series),
            Err(Error::InsufficientHistory { len, required: 35 })
        );
    }
}

#[test]
fn thirty_five_bars_is_enough() {
    let closes = dip_then(3, &[20.0, 20.0]);
    assert_eq!(closes.len(), 35);
    assert_eq!(
        engine().classify(Some(&daily(&closes))),
        Classification::Confirmed(Crossing::CrossUp)
    );
}

#[test]
fn absent_series_is_none() {
    assert_eq!(engine().classify(None), Classification::Confirmed(Crossing::None));
    assert!(extended_engine().classify(None).is_none());
}

#[test]
fn one_signed_macd_never_crosses() {
    let falling: Vec<f64> = (0..60).map(|i| 100.0 - i as f64).collect();
    let rising: Vec<f64> = (0..60).map(|i| 40.0 + i as f64).collect();

    let engine = engine();
    let macd = engine.macd_line(&falling).unwrap();
    assert!(macd[1..].iter().all(|v| *v < 0.0));

    assert!(engine.classify(Some(&daily(&falling))).is_none());
    assert!(engine.classify(Some(&daily(&rising))).is_none());
    assert!(extended_engine().classify(Some(&daily(&falling))).is_none());
}

#[test]
fn engineered_sign_change_is_a_cross_up() {
    let series = daily(&dip_then(8, &[20.0, 20.0]));
    let engine = engine();

    let macd = engine.macd_line(&series.closes()).unwrap();
    let n = macd.len();
    assert!(macd[n - 3] < 0.0 && macd[n - 2] > 0.0);

    assert_eq!(
        engine.classify(Some(&series)),
        Classification::Confirmed(Crossing::CrossUp)
    );
}

#[test]
fn mirrored_sign_change_is_a_cross_down() {
    let series = daily(&rise_then(8, &[5.0, 5.0]));
    assert_eq!(
        engine().classify(Some(&series)),
        Classification::Confirmed(Crossing::CrossDown)
    );
}

#[test]
fn latest_bar_is_ignored_by_the_confirmed_window() {
    // The crossing happens only on the final bar.
    let series = daily(&dip_then(9, &[20.0]));
    assert_eq!(
        engine().classify(Some(&series)),
        Classification::Confirmed(Crossing::None)
    );
    assert_eq!(
        extended_engine().classify(Some(&series)),
        Classification::Extended {
            one_period_ago: Crossing::None,
            current_period: Crossing::CrossUp,
        }
    );
}

#[test]
fn extended_window_reports_the_earlier_crossing() {
    let series = daily(&dip_then(8, &[20.0, 20.0]));
    let classification = extended_engine().classify(Some(&series));
    assert_eq!(
        classification,
        Classification::Extended {
            one_period_ago: Crossing::CrossUp,
            current_period: Crossing::None,
        }
    );
    assert_eq!(classification.to_string(), "CrossUp (1 period ago)");
}

#[test]
fn classify_is_idempotent() {
    let series = daily(&dip_then(8, &[20.0, 20.0]));
    let engine = engine();
    let first = engine.classify(Some(&series));
    let second = engine.classify(Some(&series));
    assert_eq!(first, second);
}

#[test]
fn non_finite_values_are_rejected() {
    let mut closes = dip_then(8, &[20.0, 20.0]);
    closes[12] = f64::INFINITY;
    let series = daily(&closes);
    assert_eq!(engine().evaluate(&series), Err(Error::NonFinite { index: 12 }));
    assert!(engine().classify(Some(&series)).is_none());
}

#[test]
fn disjoint_series_have_no_ratio() {
    let a = daily(&[1.0, 2.0, 3.0]);
    let b = Series::from_closes(start() + Duration::days(30), Duration::days(1), &[1.0, 2.0]);
    assert_eq!(relative_strength(&a, &b), Err(Error::AlignmentEmpty));
    assert!(ratio(Some(&a), Some(&b)).is_none());
}

#[test]
fn ratio_of_identical_series_is_one() {
    let a = daily(&dip_then(8, &[20.0, 20.0]));
    let rs = ratio(Some(&a), Some(&a)).unwrap();
    assert_eq!(rs.len(), a.len());
    assert!(rs.closes().iter().all(|v| *v == 1.0));
}

#[test]
fn reciprocal_ratio_crosses_the_other_way() {
    let a = daily(&dip_then(8, &[20.0, 20.0]));
    let b = daily(&[10.0; 40]);
    let engine = engine();

    let a_over_b = ratio(Some(&a), Some(&b)).unwrap();
    let b_over_a = ratio(Some(&b), Some(&a)).unwrap();

    assert_eq!(
        engine.classify(Some(&a_over_b)),
        Classification::Confirmed(Crossing::CrossUp)
    );
    assert_eq!(
        engine.classify(Some(&b_over_a)),
        Classification::Confirmed(Crossing::CrossDown)
    );
}
