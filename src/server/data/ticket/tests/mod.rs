use entity::sea_orm_active_enums::{TicketPriority, TicketStatus, UserRole};
use helpdesk_test_utils::{model::CategoryModel, model::UserModel, prelude::*};

use crate::server::{
    data::ticket::{NewTicket, TicketChanges, TicketRepository},
    model::query::{PageRequest, SortDirection, TicketFilter, TicketSort, TicketSortField},
};


/// Context with helpdesk tables, an end user and an active category
async fn setup() -> Result<(TestContext, UserModel, CategoryModel), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let category = test.category().insert_category("General").await?;

    Ok((test, user, category))
}

fn new_ticket(subject: &str, creator_id: i32, category_id: i32) -> NewTicket {
    NewTicket {
        subject: subject.to_string(),
        description: format!("Details about {}", subject),
        priority: TicketPriority::Medium,
        creator_id,
        category_id,
    }
}
