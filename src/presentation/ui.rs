use crate::application::{App, HarvestField, RegistrationField, View};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    match app.view {
        View::Home => render_home(f, chunks[1]),
        View::Marketplace => render_marketplace(f, app, chunks[1]),
        View::ProductDetails => render_product_details(f, app, chunks[1]),
        View::FarmerProfile => render_farmer_profile(f, app, chunks[1]),
        View::FarmerPortal => render_farmer_portal(f, app, chunks[1]),
        View::Cart => render_cart(f, app, chunks[1]),
    }
    render_status_bar(f, app, chunks[2]);

    if app.alert.is_some() {
        render_alert_popup(f, app);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let who = app
        .current_farmer()
        .map(|farmer| farmer.name.clone())
        .unwrap_or_else(|| "Guest".to_string());
    let header = Paragraph::new(format!(
        "KissanKart - Farm to Table | Kart: {} | {}",
        app.cart.len(),
        who
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_home(f: &mut Frame, area: Rect) {
    let text = r#"
  Fresh from the fields of Pakistan, straight to your doorstep.

  KissanKart connects you directly with local farmers. No middlemen,
  no warehouses: every listing is posted by the farmer who grew it,
  priced at their rate plus a flat 15% platform markup.

  m  browse the marketplace
  f  farmer portal (join or manage your harvests)
  c  view your Kart
"#;
    let hero = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("KissanKart"))
        .style(Style::default().fg(Color::Green))
        .wrap(Wrap { trim: false });
    f.render_widget(hero, area);
}

fn render_marketplace(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let search_style = if app.searching {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    let search = Paragraph::new(format!("Search: {}", app.search_term))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Filter: {} (Tab to change)", app.category_filter)),
        )
        .style(search_style);
    f.render_widget(search, chunks[0]);

    let header = Row::new(vec!["Product", "Category", "Price", "Farmer", "Stock"])
        .style(Style::default().fg(Color::Yellow))
        .height(1);

    let mut rows = vec![header];
    for (i, product) in app.marketplace.iter().enumerate() {
        let style = if i == app.marketplace_selected {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default()
        };
        rows.push(
            Row::new(vec![
                Cell::from(product.name.clone()),
                Cell::from(product.category.to_string()),
                Cell::from(format!("Rs {}/{}", product.consumer_price, product.unit)),
                Cell::from(product.farmer_name.clone()),
                Cell::from(product.stock_status.to_string()),
            ])
            .style(style)
            .height(1),
        );
    }

    let title = if app.viewer_location.is_some() {
        format!("Marketplace ({} products, nearest first)", app.marketplace.len())
    } else {
        format!("Marketplace ({} products)", app.marketplace.len())
    };
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30),
            Constraint::Length(10),
            Constraint::Length(14),
            Constraint::Percentage(25),
            Constraint::Length(9),
        ],
    )
    .block(Block::default().borders(Borders::ALL).title(title))
    .column_spacing(1);
    f.render_widget(table, chunks[1]);
}

fn render_product_details(f: &mut Frame, app: &App, area: Rect) {
    let Some(product) = &app.selected_product else {
        let empty = Paragraph::new("No product selected. Esc to go back.")
            .block(Block::default().borders(Borders::ALL).title("Details"));
        f.render_widget(empty, area);
        return;
    };

    let mut lines = vec![
        format!("Farmer:    {} ({})", product.farmer_name, product.location),
        format!("Price:     Rs {} / {}", product.consumer_price, product.unit),
        format!("Category:  {}", product.category),
        format!("Rating:    {:.1} / 5.0", product.rating),
        format!("Stock:     {}", product.stock_status),
        format!("Freshness: {}", product.freshness),
        String::new(),
        product.description.clone(),
        String::new(),
        format!("Media ({}):", product.media.len()),
    ];
    for (i, url) in product.media.iter().enumerate() {
        let marker = if i == app.active_media { "▶" } else { " " };
        lines.push(format!(" {} {}", marker, url));
    }

    let details = Paragraph::new(lines.join("\n"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(product.name.clone()),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(details, area);
}

fn render_farmer_profile(f: &mut Frame, app: &App, area: Rect) {
    let Some(farmer) = &app.selected_farmer else {
        let empty = Paragraph::new("No farmer selected. Esc to go back.")
            .block(Block::default().borders(Borders::ALL).title("Profile"));
        f.render_widget(empty, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let badge = if farmer.verified { " [verified]" } else { "" };
    let whatsapp = if farmer.whatsapp_enabled {
        farmer.whatsapp_link()
    } else {
        "not available".to_string()
    };
    let card = Paragraph::new(format!(
        "{}{}\n{}\nMember since {}\nRating {:.1} / 5.0\nPhone: {}\nWhatsApp: {}\n\n{}",
        farmer.name, badge, farmer.location, farmer.joined_date, farmer.rating, farmer.phone,
        whatsapp, farmer.bio
    ))
    .block(Block::default().borders(Borders::ALL).title("Farmer"))
    .wrap(Wrap { trim: false });
    f.render_widget(card, chunks[0]);

    let header = Row::new(vec!["Harvest", "Price", "Stock"])
        .style(Style::default().fg(Color::Yellow))
        .height(1);
    let mut rows = vec![header];
    for (i, product) in app.profile_products().iter().enumerate() {
        let style = if i == app.profile_selected {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default()
        };
        rows.push(
            Row::new(vec![
                Cell::from(product.name.clone()),
                Cell::from(format!("Rs {}/{}", product.consumer_price, product.unit)),
                Cell::from(product.stock_status.to_string()),
            ])
            .style(style)
            .height(1),
        );
    }
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(50),
            Constraint::Length(14),
            Constraint::Length(9),
        ],
    )
    .block(Block::default().borders(Borders::ALL).title("Harvests"))
    .column_spacing(1);
    f.render_widget(table, chunks[1]);
}

fn render_farmer_portal(f: &mut Frame, app: &App, area: Rect) {
    if app.current_farmer().is_none() {
        render_registration_form(f, app, area);
    } else if app.show_listing_form {
        render_listing_form(f, app, area);
    } else {
        render_dashboard(f, app, area);
    }
}

fn render_registration_form(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        "Join KissanKart as a farmer and sell directly to buyers.".to_string(),
        String::new(),
    ];
    for field in RegistrationField::ALL {
        let marker = if field == app.registration.focus { ">" } else { " " };
        let value = match field {
            RegistrationField::Name => &app.registration.name,
            RegistrationField::Location => &app.registration.location,
            RegistrationField::Phone => &app.registration.phone,
            RegistrationField::Crops => &app.registration.crops,
        };
        lines.push(format!(" {} {:<22} {}", marker, field.label(), value));
    }

    let form = Paragraph::new(lines.join("\n"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Join as a Farmer"),
        )
        .style(Style::default().fg(Color::Yellow));
    f.render_widget(form, area);
}

fn render_listing_form(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    for field in HarvestField::ALL {
        let marker = if field == app.harvest.focus { ">" } else { " " };
        let value = match field {
            HarvestField::Name => app.harvest.name.clone(),
            HarvestField::Price => format!("Rs {}", app.harvest.price_input),
            HarvestField::Category => format!("< {} >", app.harvest.category),
            HarvestField::Unit => app.harvest.unit.clone(),
            HarvestField::Media => app.harvest.media_input.clone(),
            HarvestField::Description => app.harvest.description.clone(),
        };
        lines.push(format!(" {} {:<14} {}", marker, field.label(), value));
    }
    lines.push(String::new());
    lines.push(format!("Attached media ({}):", app.harvest.media.len()));
    for url in &app.harvest.media {
        lines.push(format!("   - {}", url));
    }

    let form = Paragraph::new(lines.join("\n"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Post a Harvest"),
        )
        .style(Style::default().fg(Color::Green))
        .wrap(Wrap { trim: false });
    f.render_widget(form, area);
}

fn render_dashboard(f: &mut Frame, app: &App, area: Rect) {
    let tips_height = if app.marketing_tips.is_empty() {
        0
    } else {
        (app.marketing_tips.len() as u16 * 2).min(8) + 2
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(tips_height),
        ])
        .split(area);

    if let Some(farmer) = app.current_farmer() {
        let badge = if farmer.verified { " [verified]" } else { "" };
        let card = Paragraph::new(format!(
            "{}{} | {}\nMember since {} | Rating {:.1} / 5.0",
            farmer.name, badge, farmer.location, farmer.joined_date, farmer.rating
        ))
        .block(Block::default().borders(Borders::ALL).title("My Farm"))
        .style(Style::default().fg(Color::Cyan));
        f.render_widget(card, chunks[0]);
    }

    let mine = app.my_products();
    let header = Row::new(vec!["Harvest", "Category", "Base", "Buyer Price", "Stock"])
        .style(Style::default().fg(Color::Yellow))
        .height(1);
    let mut rows = vec![header];
    for product in &mine {
        rows.push(
            Row::new(vec![
                Cell::from(product.name.clone()),
                Cell::from(product.category.to_string()),
                Cell::from(format!("Rs {}", product.base_price)),
                Cell::from(format!("Rs {}", product.consumer_price)),
                Cell::from(product.stock_status.to_string()),
            ])
            .height(1),
        );
    }
    let title = format!("My Harvests ({})", mine.len());
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(34),
            Constraint::Length(10),
            Constraint::Length(9),
            Constraint::Length(12),
            Constraint::Length(9),
        ],
    )
    .block(Block::default().borders(Borders::ALL).title(title))
    .column_spacing(1);
    f.render_widget(table, chunks[1]);

    if tips_height > 0 {
        let mut lines = Vec::new();
        for tip in &app.marketing_tips {
            lines.push(format!("{}: {}", tip.tip, tip.description));
        }
        let tips = Paragraph::new(lines.join("\n"))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Marketing Tips"),
            )
            .style(Style::default().fg(Color::Magenta))
            .wrap(Wrap { trim: true });
        f.render_widget(tips, chunks[2]);
    }
}

fn render_cart(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    if app.cart.is_empty() {
        let empty = Paragraph::new("Your Kart is empty. Browse the marketplace to add produce.")
            .block(Block::default().borders(Borders::ALL).title("Kart"));
        f.render_widget(empty, chunks[0]);
    } else {
        let header = Row::new(vec!["Product", "Farmer", "Price", "Qty", "Line Total"])
            .style(Style::default().fg(Color::Yellow))
            .height(1);
        let mut rows = vec![header];
        for (i, item) in app.cart.items().iter().enumerate() {
            let style = if i == app.cart_selected {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else {
                Style::default()
            };
            rows.push(
                Row::new(vec![
                    Cell::from(item.product.name.clone()),
                    Cell::from(item.product.farmer_name.clone()),
                    Cell::from(format!(
                        "Rs {}/{}",
                        item.product.consumer_price, item.product.unit
                    )),
                    Cell::from(item.quantity.to_string()),
                    Cell::from(format!("Rs {}", item.line_total())),
                ])
                .style(style)
                .height(1),
            );
        }
        let table = Table::new(
            rows,
            [
                Constraint::Percentage(30),
                Constraint::Percentage(22),
                Constraint::Length(14),
                Constraint::Length(5),
                Constraint::Length(12),
            ],
        )
        .block(Block::default().borders(Borders::ALL).title("Kart"))
        .column_spacing(1);
        f.render_widget(table, chunks[0]);
    }

    let total = Paragraph::new(format!("Total: Rs {}", app.cart.total()))
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Green));
    f.render_widget(total, chunks[1]);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = if app.alert.is_some() {
        "Enter/Esc: dismiss".to_string()
    } else if let Some(ref status) = app.status_message {
        status.clone()
    } else {
        match app.view {
            View::Home => {
                "m: marketplace | f: farmer portal | c: kart | q: quit".to_string()
            }
            View::Marketplace => {
                if app.searching {
                    format!("Search: {} (Enter/Esc to finish)", app.search_term)
                } else {
                    "/: search | Tab: category | j/k: move | Enter: details | a: add to kart | v: farmer | q: quit"
                        .to_string()
                }
            }
            View::ProductDetails => {
                "←/→: media | a: add to kart | v: farmer profile | Esc: back".to_string()
            }
            View::FarmerProfile => {
                "j/k: move | Enter: details | a: add to kart | y: copy phone | w: WhatsApp link | Esc: back"
                    .to_string()
            }
            View::FarmerPortal => {
                if app.current_farmer().is_none() {
                    "Tab: next field | Enter: join | Esc: home".to_string()
                } else if app.show_listing_form {
                    "Tab: field | Enter: add media / submit | Ctrl+P: AI price | Ctrl+D: AI description | Ctrl+R: drop media | Esc: close"
                        .to_string()
                } else {
                    "n: new harvest | t: marketing tips | Ctrl+E: export CSV | l: logout | Esc: home"
                        .to_string()
                }
            }
            View::Cart => "j/k: move | d: remove | Enter: checkout | Esc: home".to_string(),
        }
    };

    let style = if app.alert.is_some() {
        Style::default().fg(Color::Yellow)
    } else {
        match app.view {
            View::Home => Style::default(),
            View::Marketplace => {
                if app.searching {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                }
            }
            View::ProductDetails => Style::default().fg(Color::Cyan),
            View::FarmerProfile => Style::default().fg(Color::Cyan),
            View::FarmerPortal => Style::default().fg(Color::Yellow),
            View::Cart => Style::default().fg(Color::Green),
        }
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(style);
    f.render_widget(status, area);
}

fn render_alert_popup(f: &mut Frame, app: &App) {
    let Some(message) = &app.alert else {
        return;
    };
    let area = f.area();
    let width = (area.width * 3 / 5).clamp(20, 70).min(area.width);
    let height = 7.min(area.height);
    let popup_area = Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    f.render_widget(Clear, popup_area);
    let popup = Paragraph::new(format!("\n{}", message))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("KissanKart")
                .style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true });
    f.render_widget(popup, popup_area);
}
