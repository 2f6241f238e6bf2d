mod notification;
mod ticket;
