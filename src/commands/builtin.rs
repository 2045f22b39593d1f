use super::CommandResult;
use crate::error::Result;
use crate::session::Session;

pub fn print_command(session: &Session) -> Result<CommandResult> {
    session.handle_print()?;
    Ok(CommandResult::Continue)
}

pub fn course_command(session: &mut Session, arg: Option<&str>) -> Result<CommandResult> {
    session.handle_course(arg)
}

pub fn new_command(session: &mut Session, arg: Option<&str>) -> Result<CommandResult> {
    session.handle_new(arg)
}

pub fn scan_command(session: &mut Session) -> Result<CommandResult> {
    session.handle_scan()?;
    Ok(CommandResult::Continue)
}

pub fn save_command(session: &mut Session) -> Result<CommandResult> {
    session.handle_save()?;
    Ok(CommandResult::Continue)
}
