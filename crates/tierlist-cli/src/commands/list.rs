//! List command implementation.

use super::{status_outcome, Outcome};
use crate::error::Result;
use crate::output::Formatter;
use tierlist_domain::{SharedManager, TierlistError};

/// Execute the list command: print the active tierlist.
pub fn execute_list(manager: &SharedManager, formatter: &Formatter) -> Result<Outcome> {
    let listing = manager.with(|m| {
        let name = m.active_name()?;
        let tierlist = m.active_tierlist()?;
        Some(formatter.format_tierlist(name, tierlist))
    });

    match listing {
        Some(text) => Ok(Outcome::Reply {
            text: text?,
            success: true,
        }),
        None => Ok(status_outcome(
            &Err::<(), _>(TierlistError::TierlistNotActive),
            formatter,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{formatter, text};
    use crate::commands::{execute_add, execute_begin};
    use tierlist_domain::MemberId;

    #[test]
    fn test_list_without_active_list() {
        let manager = SharedManager::default();
        assert_eq!(
            text(execute_list(&manager, &formatter()).unwrap()),
            "Result: TIERLIST_NOT_ACTIVE"
        );
    }

    #[test]
    fn test_list_active_members() {
        let manager = SharedManager::default();
        let f = formatter();
        execute_begin(&manager, "team", &f);
        execute_add(&manager, MemberId(3), "C", "uri".into(), "Carol".into(), &f);
        execute_add(&manager, MemberId(4), "S", "uri".into(), "Dan".into(), &f);

        assert_eq!(text(execute_list(&manager, &f).unwrap()), "4\n3");
    }
}
