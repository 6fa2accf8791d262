//! begin / end / add / remove.

use super::{status_outcome, Outcome};
use crate::output::Formatter;
use tierlist_domain::{Member, MemberId, SharedManager};

/// Execute the begin command.
pub fn execute_begin(manager: &SharedManager, name: &str, formatter: &Formatter) -> Outcome {
    let result = manager.with(|m| m.begin_tierlist(name));
    status_outcome(&result, formatter)
}

/// Execute the end command.
pub fn execute_end(manager: &SharedManager, formatter: &Formatter) -> Outcome {
    let result = manager.with(|m| m.end_tierlist());
    status_outcome(&result, formatter)
}

/// Execute the add command. `tier` is passed through unvalidated so that a
/// bad tier reports `INVALID_TIER`.
pub fn execute_add(
    manager: &SharedManager,
    id: MemberId,
    tier: &str,
    avatar_uri: String,
    name: String,
    formatter: &Formatter,
) -> Outcome {
    let result = manager.with(|m| m.add_to_tierlist(id, Member::new(name, avatar_uri), tier));
    status_outcome(&result, formatter)
}

/// Execute the remove command.
pub fn execute_remove(manager: &SharedManager, id: MemberId, formatter: &Formatter) -> Outcome {
    let result = manager.with(|m| m.remove_from_tierlist(id));
    status_outcome(&result, formatter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{formatter, text};
    use tierlist_domain::Tier;

    #[test]
    fn test_full_session_statuses() {
        let manager = SharedManager::default();
        let f = formatter();

        let mut lines = vec![
            text(execute_end(&manager, &f)),
            text(execute_begin(&manager, "team", &f)),
            text(execute_begin(&manager, "other", &f)),
            text(execute_add(&manager, MemberId(1), "S", "uri".into(), "Alice".into(), &f)),
            text(execute_add(&manager, MemberId(1), "b tier", "uri".into(), "Alice".into(), &f)),
            text(execute_add(&manager, MemberId(2), "Z", "uri".into(), "Bob".into(), &f)),
        ];
        lines.push(text(execute_remove(&manager, MemberId(9), &f)));
        lines.push(text(execute_remove(&manager, MemberId(1), &f)));
        lines.push(text(execute_end(&manager, &f)));
        lines.push(text(execute_remove(&manager, MemberId(1), &f)));

        assert_eq!(
            lines,
            [
                "Result: TIERLIST_NOT_ACTIVE",
                "Result: SUCCESS",
                "Result: TIERLIST_ALREADY_ACTIVE",
                "Result: SUCCESS",
                "Result: SUCCESS",
                "Result: INVALID_TIER",
                "Result: USER_NOT_FOUND",
                "Result: SUCCESS",
                "Result: SUCCESS",
                "Result: TIERLIST_NOT_ACTIVE",
            ]
        );
    }

    #[test]
    fn test_add_moves_member() {
        let manager = SharedManager::default();
        let f = formatter();
        execute_begin(&manager, "team", &f);
        execute_add(&manager, MemberId(5), "A", "uri".into(), "Eve".into(), &f);
        execute_add(&manager, MemberId(5), "f", "uri2".into(), "Eve".into(), &f);

        manager.with(|m| {
            let tierlist = m.active_tierlist().unwrap();
            assert_eq!(tierlist.tier_of(MemberId(5)), Some(Tier::F));
            assert_eq!(tierlist.len(), 1);
            assert_eq!(tierlist.get(MemberId(5)).unwrap().avatar_url, "uri2");
        });
    }

    #[test]
    fn test_failed_outcome_flag() {
        let manager = SharedManager::default();
        match execute_end(&manager, &formatter()) {
            Outcome::Reply { success, .. } => assert!(!success),
            Outcome::Exit => panic!("Expected a reply"),
        }
    }
}
