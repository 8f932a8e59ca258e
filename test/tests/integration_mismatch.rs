/// Integration tests for a producer and display built from different schema
/// versions: unknown widgets, children, properties and layout modifiers
/// under both mismatch policies

use treehouse_shared::{
    ChildrenTag, Diff, LayoutModifierElement, LayoutModifierTag, MismatchPolicy, PropertyDiff,
    PropertyTag, WidgetId,
};
use treehouse_compose::ComposeConfig;
use treehouse_test::{
    assert_root_kinds, init_logger, HarnessError, LayoutModifierKind, RowChildren, TestHarness,
    TestWidgetFactory, WidgetKind,
};
use treehouse_widget::{DisplayConfig, DisplayError};

fn harness(policy: MismatchPolicy, factory: TestWidgetFactory) -> TestHarness {
    let display_config = DisplayConfig {
        mismatch_policy: policy,
    };
    TestHarness::with_configs(ComposeConfig::default(), display_config, factory)
}

fn expect_display_error(result: Result<bool, HarnessError>) -> DisplayError {
    match result {
        Err(HarnessError::Display(error)) => error,
        other => panic!("Expected a display error, got {:?}", other),
    }
}

#[test]
fn unknown_widget_fails_when_strict() {
    init_logger();

    let mut harness = harness(
        MismatchPolicy::Strict,
        TestWidgetFactory::without(&[WidgetKind::Row]),
    );
    harness
        .insert(WidgetId::ROOT, ChildrenTag::ROOT, 0, WidgetKind::Row)
        .unwrap();

    assert_eq!(
        expect_display_error(harness.frame()),
        DisplayError::UnknownWidget {
            tag: WidgetKind::Row.tag(),
        }
    );
    assert!(harness.root_views().is_empty());
}

#[test]
fn unknown_widget_subtree_is_skipped_when_tolerant() {
    init_logger();

    let mut harness = harness(
        MismatchPolicy::Tolerant,
        TestWidgetFactory::without(&[WidgetKind::Row]),
    );
    let row = harness
        .insert(WidgetId::ROOT, ChildrenTag::ROOT, 0, WidgetKind::Row)
        .unwrap();
    let hidden = harness
        .insert(row, RowChildren::Items.tag(), 0, WidgetKind::Text)
        .unwrap();
    let label = harness
        .insert(WidgetId::ROOT, ChildrenTag::ROOT, 1, WidgetKind::Text)
        .unwrap();
    harness.set_text(hidden, Some("hidden")).unwrap();
    harness.set_text(label, Some("shown")).unwrap();
    harness.frame().unwrap();

    let display = harness.display();
    assert_eq!(display.node_count(), 4);
    assert_eq!(display.widget_count(), 2);
    assert!(display.contains(&row) && !display.is_rendered(&row));
    assert!(display.contains(&hidden) && !display.is_rendered(&hidden));
    assert_root_kinds!(harness, [WidgetKind::Text]);
    assert_eq!(harness.root_views()[0].borrow().text(), Some("shown"));

    // Indices keep pointing past the skipped row
    let button = harness
        .insert(WidgetId::ROOT, ChildrenTag::ROOT, 0, WidgetKind::Button)
        .unwrap();
    harness.frame().unwrap();
    assert_root_kinds!(harness, [WidgetKind::Button, WidgetKind::Text]);

    harness
        .move_children(WidgetId::ROOT, ChildrenTag::ROOT, 1, 3, 1)
        .unwrap();
    harness.frame().unwrap();
    assert_eq!(
        harness.display().children(&WidgetId::ROOT, ChildrenTag::ROOT),
        Some(&[button, label, row][..])
    );
    assert_root_kinds!(harness, [WidgetKind::Button, WidgetKind::Text]);

    harness
        .remove(WidgetId::ROOT, ChildrenTag::ROOT, 2, 1)
        .unwrap();
    harness.frame().unwrap();
    assert_eq!(harness.display().node_count(), 3);
    assert!(!harness.display().contains(&hidden));
    assert_root_kinds!(harness, [WidgetKind::Button, WidgetKind::Text]);
}

#[test]
fn unknown_children_tag_follows_policy() {
    init_logger();

    let unknown_slot = ChildrenTag::new(5);
    for policy in [MismatchPolicy::Strict, MismatchPolicy::Tolerant] {
        let mut harness = harness(policy, TestWidgetFactory::new());
        let row = harness
            .insert(WidgetId::ROOT, ChildrenTag::ROOT, 0, WidgetKind::Row)
            .unwrap();
        harness.frame().unwrap();
        // The reference tree only knows the slots the schema declares
        let child = harness
            .composition_mut()
            .insert(row, unknown_slot, 0, WidgetKind::Text.tag())
            .unwrap();

        match policy {
            MismatchPolicy::Strict => assert_eq!(
                expect_display_error(harness.frame()),
                DisplayError::UnknownChildren {
                    widget_tag: WidgetKind::Row.tag(),
                    tag: unknown_slot,
                }
            ),
            MismatchPolicy::Tolerant => {
                harness.frame().unwrap();
                assert!(harness.display().contains(&child));
                assert!(!harness.display().is_rendered(&child));
                let row_view = harness.root_views()[0].clone();
                assert!(row_view.borrow().children(RowChildren::Items.tag()).is_empty());
            }
        }
    }
}

#[test]
fn property_from_newer_producer_follows_policy() {
    init_logger();

    let newer_property = PropertyTag::new(9);
    for policy in [MismatchPolicy::Strict, MismatchPolicy::Tolerant] {
        let mut harness = harness(policy, TestWidgetFactory::new());
        let text = harness
            .insert(WidgetId::ROOT, ChildrenTag::ROOT, 0, WidgetKind::Text)
            .unwrap();
        harness.set_text(text, Some("before")).unwrap();
        harness.frame().unwrap();

        let diff = Diff {
            property_diffs: vec![PropertyDiff::new(text, newer_property, "after")],
            ..Default::default()
        };
        let result = harness.display_diff(&diff);

        match policy {
            MismatchPolicy::Strict => match result {
                Err(HarnessError::Display(error)) => assert_eq!(
                    error,
                    DisplayError::UnknownProperty {
                        widget_tag: WidgetKind::Text.tag(),
                        tag: newer_property,
                    }
                ),
                other => panic!("Expected an unknown property error, got {:?}", other),
            },
            MismatchPolicy::Tolerant => assert!(result.is_ok()),
        }
        assert_eq!(harness.root_views()[0].borrow().text(), Some("before"));
    }
}

#[test]
fn unknown_layout_modifiers_follow_policy() {
    init_logger();

    let padding = LayoutModifierElement {
        tag: LayoutModifierKind::Padding.tag(),
        value: 8.into(),
    };
    let unknown = LayoutModifierElement {
        tag: LayoutModifierTag::new(7),
        value: "wide".into(),
    };
    let weight = LayoutModifierElement {
        tag: LayoutModifierKind::Weight.tag(),
        value: 1.into(),
    };

    for policy in [MismatchPolicy::Strict, MismatchPolicy::Tolerant] {
        let mut harness = harness(policy, TestWidgetFactory::new());
        let button = harness
            .insert(WidgetId::ROOT, ChildrenTag::ROOT, 0, WidgetKind::Button)
            .unwrap();
        harness
            .set_layout_modifiers(button, vec![padding.clone(), unknown.clone(), weight.clone()])
            .unwrap();

        match policy {
            MismatchPolicy::Strict => {
                assert_eq!(
                    expect_display_error(harness.frame()),
                    DisplayError::UnknownLayoutModifier {
                        tag: LayoutModifierTag::new(7),
                    }
                );
                assert!(harness.root_views()[0].borrow().layout_modifiers().is_empty());
            }
            MismatchPolicy::Tolerant => {
                harness.frame().unwrap();
                assert_eq!(
                    harness.root_views()[0].borrow().layout_modifiers(),
                    &[padding.clone(), weight.clone()][..]
                );
            }
        }
    }
}
