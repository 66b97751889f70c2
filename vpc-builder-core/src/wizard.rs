//! Main menu loop

use crate::access::AccessFlow;
use crate::console::choose_from;
use crate::create::Creator;
use crate::delete::Deleter;
use crate::modify::Modifier;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Create,
    Access,
    Modify,
    Delete,
    Exit,
}

const MAIN_MENU: &[(MenuChoice, &str)] = &[
    (MenuChoice::Create, "Create"),
    (MenuChoice::Access, "Access"),
    (MenuChoice::Modify, "Modify"),
    (MenuChoice::Delete, "Delete"),
    (MenuChoice::Exit, "Exit"),
];

pub struct Wizard<'a> {
    session: Session<'a>,
}

impl<'a> Wizard<'a> {
    pub fn new(session: Session<'a>) -> Self {
        Self { session }
    }

    /// Loop over the main menu until Exit; a cancelled menu counts as Exit
    pub async fn run(&self) {
        loop {
            let choice = choose_from(self.session.prompter, "What do you want to do?", MAIN_MENU)
                .unwrap_or(MenuChoice::Exit);
            log::debug!("main menu: {:?}", choice);

            match choice {
                MenuChoice::Create => Creator::new(self.session).run().await,
                MenuChoice::Access => AccessFlow::new(self.session).run().await,
                MenuChoice::Modify => Modifier::new(self.session).run().await,
                MenuChoice::Delete => Deleter::new(self.session).run().await,
                MenuChoice::Exit => {
                    self.session.reporter.info("Goodbye 👋");
                    break;
                }
            }
        }
    }
}
