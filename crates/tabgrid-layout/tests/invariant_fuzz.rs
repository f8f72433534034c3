//! Property checks over random command streams.
//!
//! Every reachable state must pass `validate()`, rejected commands must leave
//! the state untouched, track sums must match the last viewport size, and no
//! track may shrink to zero pixels.

use proptest::prelude::*;
use tabgrid_core::{ClusterKey, IdType, Priorities, Redistribution, ReorderStrategy};
use tabgrid_layout::allocator::{even, make_room, redistribute};
use tabgrid_layout::{Command, ContainerStateMachine, WindowId};

#[derive(Debug, Clone)]
enum Op {
    AddTab,
    RemoveTab(usize),
    ReorderTab(usize, usize),
    ReorderById(usize, usize, bool),
    AddWindow(usize, usize, u8),
    RemoveWindow(usize, bool, u8),
    Assign(usize, usize),
    BrowserResize(u32, u32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::AddTab),
        1 => any::<usize>().prop_map(Op::RemoveTab),
        1 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::ReorderTab(a, b)),
        1 => (any::<usize>(), any::<usize>(), any::<bool>()).prop_map(|(a, b, s)| Op::ReorderById(a, b, s)),
        3 => (any::<usize>(), any::<usize>(), 0u8..4).prop_map(|(t, r, s)| Op::AddWindow(t, r, s)),
        2 => (any::<usize>(), any::<bool>(), 0u8..4).prop_map(|(w, by_tab, s)| Op::RemoveWindow(w, by_tab, s)),
        2 => (any::<usize>(), any::<usize>()).prop_map(|(t, w)| Op::Assign(t, w)),
        1 => (0u32..3000, 0u32..2000).prop_map(|(w, h)| Op::BrowserResize(w, h)),
    ]
}

fn strategy(code: u8) -> Redistribution {
    match code {
        0 => Redistribution::Even,
        1 => Redistribution::priority(Priorities::FIRST),
        2 => Redistribution::priority(Priorities::LAST),
        _ => Redistribution::priority(Priorities::Tracks(vec![0, 2, 5])),
    }
}

/// Turn an abstract op into a concrete command against the current state.
/// Indices wrap over the live tabs/windows, with one extra slot that names
/// something missing so rejections get exercised too.
fn concretize(machine: &ContainerStateMachine, op: &Op) -> Command {
    let state = machine.state();
    let tab = |i: usize| {
        let tabs = state.tabs();
        tabs.get(i % (tabs.len() + 1))
            .map(|t| t.id.clone())
            .unwrap_or_else(|| "tab-missing".into())
    };
    let window = |i: usize| {
        let windows = state.windows();
        windows
            .get(i % (windows.len() + 1))
            .map(|w| w.id.clone())
            .unwrap_or_else(|| WindowId::from("win-missing"))
    };
    let tab_count = state.tabs().len().max(1);

    match op {
        Op::AddTab => Command::AddTab {
            cluster: ClusterKey::from("fuzz"),
            icon: None,
            label: None,
        },
        Op::RemoveTab(i) => Command::RemoveTab { tab_id: tab(*i) },
        Op::ReorderTab(from, to) => {
            let old_index = from % (tab_count + 1);
            Command::ReorderTab {
                tab_id: tab(old_index),
                old_index,
                new_index: to % (tab_count + 1),
            }
        }
        Op::ReorderById(a, b, swap) => Command::ReorderTabsById {
            tab_id1: tab(*a),
            tab_id2: tab(*b),
            strategy: if *swap {
                ReorderStrategy::Swap
            } else {
                ReorderStrategy::Shift
            },
        },
        Op::AddWindow(t, row, code) => Command::AddWindow {
            tab_id: tab(*t),
            row: row % (state.layout().rows.len() + 3),
            redistribution: strategy(*code),
        },
        Op::RemoveWindow(w, by_tab, code) => {
            let target = window(*w);
            let (target, id_type) = match state.window(&target) {
                Some(found) if *by_tab => (found.tab_id.to_string(), IdType::Tab),
                _ => (target.to_string(), IdType::Window),
            };
            Command::RemoveWindow {
                target,
                id_type,
                redistribution: strategy(*code),
            }
        }
        Op::Assign(t, w) => Command::AssignTabToWindow {
            tab_id: tab(*t),
            window_id: window(*w),
        },
        Op::BrowserResize(width, height) => Command::HandleBrowserResize {
            width: *width,
            height: *height,
        },
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_command_streams_preserve_invariants(ops in prop::collection::vec(op(), 1..120)) {
        let mut machine = ContainerStateMachine::default();
        let (mut width, mut height) = (1200u32, 800u32);

        for op in &ops {
            let command = concretize(&machine, op);
            let before = machine.state().clone();
            let outcome = machine.dispatch(command.clone());

            let state = machine.state();
            prop_assert_eq!(state.validate(), Ok(()), "after {:?}", command);
            match outcome {
                Ok(()) => {
                    if let Command::HandleBrowserResize { width: w, height: h } = command {
                        width = w;
                        height = h;
                    }
                }
                Err(_) => prop_assert_eq!(state, &before),
            }
            prop_assert_eq!(state.layout().width(), width);
            prop_assert_eq!(state.layout().height(), height);
            prop_assert!(state.layout().columns.iter().all(|&s| s > 0), "columns {:?}", state.layout().columns);
            prop_assert!(state.layout().rows.iter().all(|&s| s > 0), "rows {:?}", state.layout().rows);
        }
    }

    #[test]
    fn even_redistribution_conserves_total(
        sizes in prop::collection::vec(1u32..5000, 1..24),
        extra in 0u32..100_000,
    ) {
        let total = sizes.len() as u32 + extra;
        let result = redistribute(&sizes, total, &Redistribution::Even, 40);
        prop_assert_eq!(result.len(), sizes.len());
        prop_assert_eq!(result.iter().sum::<u32>(), total);
        prop_assert_eq!(result, even(sizes.len(), total));
    }

    #[test]
    fn priority_redistribution_conserves_total(
        sizes in prop::collection::vec(1u32..5000, 1..24),
        total in 0u32..100_000,
        code in 1u8..4,
    ) {
        let result = redistribute(&sizes, total, &strategy(code), 40);
        prop_assert_eq!(result.len(), sizes.len());
        prop_assert_eq!(result.iter().sum::<u32>(), total);
    }

    #[test]
    fn make_room_conserves_total_and_keeps_tracks_positive(
        sizes in prop::collection::vec(1u32..5000, 1..24),
        code in 0u8..4,
    ) {
        let total: u32 = sizes.iter().sum();
        prop_assume!(total as usize > sizes.len());
        let result = make_room(&sizes, total, &strategy(code), 40);
        prop_assert_eq!(result.len(), sizes.len() + 1);
        prop_assert_eq!(result.iter().sum::<u32>(), total);
        prop_assert!(result.iter().all(|&s| s > 0));
    }
}

#[test]
fn priority_strategies_take_effect_on_add_window() {
    let mut machine = ContainerStateMachine::default();
    for _ in 0..5 {
        machine.add_tab(ClusterKey::from("fuzz"), None, None);
    }
    let ids: Vec<_> = machine.state().tabs().iter().map(|t| t.id.clone()).collect();
    for id in &ids[..3] {
        machine.add_window(id, 1, &Redistribution::Even).unwrap();
    }
    machine.resize_columns(vec![300, 300, 600]).unwrap();

    machine.add_window(&ids[3], 1, &strategy(2)).unwrap();
    assert_eq!(machine.state().layout().columns, vec![300, 300, 200, 400]);

    machine.add_window(&ids[4], 1, &strategy(3)).unwrap();
    assert_eq!(machine.state().layout().columns, vec![150, 300, 50, 400, 300]);
}

#[test]
fn even_remainder_lands_on_last_track() {
    for count in 1..10usize {
        for total in count as u32..(count as u32 + 40) {
            let sizes = even(count, total);
            let share = total / count as u32;
            assert!(sizes[..count - 1].iter().all(|&s| s == share));
            assert_eq!(sizes[count - 1], total - share * (count as u32 - 1));
        }
    }
}
