//! The `/homes` command family and its tab completions.
//!
//! Every command takes the invoking player, does its checks in order, and
//! either mutates state or returns a [`Warning`] without touching
//! anything. The command layer of the server plugin shows the warning
//! text to the player.
//!
//! | Subcommand | Method |
//! |---|---|
//! | `/homes` | [`list_homes`](Homestead::list_homes) |
//! | `/homes set [name]` | [`set_home`](Homestead::set_home) |
//! | `/homes info [name]` | [`home_info`](Homestead::home_info) |
//! | `/homes invites` | [`list_invites`](Homestead::list_invites) |
//! | `/homes invite <player> [name]` | [`invite`](Homestead::invite) |
//! | `/homes uninvite <player> [name]` | [`uninvite`](Homestead::uninvite) |
//! | `/homes public [name] [alias]` | [`make_public`](Homestead::make_public) |
//! | `/homes delete [name]` | [`delete_home`](Homestead::delete_home) |
//! | `/homes page <n>` | [`show_page`](Homestead::show_page) |
//! | `/visit` | [`list_public_homes`](Homestead::list_public_homes) |
//!
//! `/home` and `/visit <alias>` move the player and live in
//! [`travel`](crate::travel).

use homestead_claim::can_build_at;
use homestead_home::{Home, HomeError, HomeInvite, HomeStore};
use homestead_protocol::{PlayerId, PlayerView, PluginEvent, Warning};

use crate::{Homestead, Platform};

fn paginate(lines: &[String], page_len: usize) -> Vec<String> {
    lines
        .chunks(page_len.max(1))
        .map(|chunk| chunk.join("\n"))
        .collect()
}

impl<P: Platform, S: HomeStore> Homestead<P, S> {
    /// Sends `header`, then the first page of `lines`. Longer listings are
    /// stored on the session for `/homes page`.
    fn show_paged(&mut self, player: PlayerId, header: &str, lines: &[String]) {
        self.tell(player, header);
        let mut pages = paginate(lines, self.config.page_len);
        if pages.len() <= 1 {
            for page in &pages {
                self.tell(player, page);
            }
            return;
        }
        match self.sessions.get_mut(&player) {
            Some(session) => {
                session.set_pages(pages);
                session.show_stored_page(self.platform.as_ref(), 0);
            }
            None => self.tell(player, &pages.swap_remove(0)),
        }
    }

    // -- Listing ---------------------------------------------------------------

    pub fn list_homes(&mut self, player: PlayerId) -> Result<(), Warning> {
        let lines: Vec<String> = self
            .homes
            .find_owned(player)
            .iter()
            .map(|home| match home.name() {
                None => " + Primary".to_string(),
                Some(name) => format!(" + {name}"),
            })
            .collect();
        if lines.is_empty() {
            return Err(Warning::new("No homes to show"));
        }

        let header = match lines.len() {
            1 => "You have one home".to_string(),
            n => format!("You have {n} homes"),
        };
        self.show_paged(player, &header, &lines);
        self.emit(PluginEvent::ListHomes {
            player,
            count: lines.len(),
        });
        Ok(())
    }

    /// `/visit` without arguments: public homes, most visited first.
    pub fn list_public_homes(&mut self, player: PlayerId) -> Result<(), Warning> {
        let lines: Vec<String> = self
            .homes
            .public_homes_ranked()
            .iter()
            .map(|home| {
                format!(
                    " + {} by {}",
                    home.public_name().unwrap_or_default(),
                    home.owner_name()
                )
            })
            .collect();
        if lines.is_empty() {
            return Err(Warning::new("No public homes to show"));
        }

        let header = match lines.len() {
            1 => "One public home".to_string(),
            n => format!("{n} public homes"),
        };
        self.emit(PluginEvent::ViewPublicHomes { player });
        self.show_paged(player, &header, &lines);
        Ok(())
    }

    /// `/homes page <n>`, one-based.
    pub fn show_page(&self, player: PlayerId, arg: &str) -> Result<(), Warning> {
        let number: i64 = arg
            .trim()
            .parse()
            .map_err(|_| Warning::new(format!("Not a number: {arg}")))?;
        let shown = number
            .checked_sub(1)
            .and_then(|index| usize::try_from(index).ok())
            .zip(self.sessions.get(&player))
            .is_some_and(|(index, session)| session.show_stored_page(self.platform.as_ref(), index));
        if !shown {
            return Err(Warning::new(format!("Page does not exist: {number}")));
        }
        Ok(())
    }

    // -- Set / info / delete ---------------------------------------------------

    /// Sets the primary home (`name == None`) or a named home to where the
    /// player stands.
    pub fn set_home(&mut self, player: &PlayerView, name: Option<&str>) -> Result<(), Warning> {
        let location = &player.location;
        if !self.worlds.is_local_home_world(&location.world) {
            return Err(Warning::new("You cannot set homes in this world"));
        }
        if !can_build_at(&self.claims, self.actor(player.id), &location.to_block()) {
            return Err(Warning::new("You cannot set homes in this claim"));
        }
        if let Some(nearby) = self.homes.find_nearby(
            player.id,
            &location.world,
            location.block_x(),
            location.block_z(),
            self.config.home_margin,
            name,
        ) {
            return Err(Warning::new(match nearby.name() {
                None => "Your primary home is nearby".to_string(),
                Some(other) => format!("You have a home named \"{other}\" nearby"),
            }));
        }

        let (id, created) = self.homes.upsert(player.id, &player.name, name, location);
        if let Some(home) = self.homes.get(id) {
            if created {
                self.store.insert_home(home);
            } else {
                self.store.update_home(home);
            }
        }

        match name {
            None => {
                self.tell(player.id, "Primary home set");
                self.emit(PluginEvent::SetPrimaryHome { player: player.id });
            }
            Some(name) => {
                self.tell(player.id, &format!("Home \"{name}\" set"));
                self.emit(PluginEvent::SetNamedHome {
                    player: player.id,
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn home_info(&self, player: PlayerId, name: Option<&str>) -> Result<(), Warning> {
        let home = self
            .homes
            .find(player, name)
            .ok_or_else(|| Warning::new("Home not found."))?;

        let header = match home.name() {
            None => "Primary Home Info".to_string(),
            Some(name) => format!("{name} Info"),
        };
        let mut invited: Vec<String> = home
            .invites()
            .iter()
            .map(|id| {
                self.platform
                    .name_for_player(*id)
                    .unwrap_or_else(|| id.to_string())
            })
            .collect();
        invited.sort();

        let lines = [
            header,
            format!(
                " Location: {} {},{},{}",
                self.worlds.display_name(home.world()),
                home.x().floor() as i64,
                home.y().floor() as i64,
                home.z().floor() as i64
            ),
            format!(" Invited: {} {}", invited.len(), invited.join(", ")),
            format!(
                " Public: {}",
                if home.public_name().is_some() { "yes" } else { "no" }
            ),
        ];
        self.tell(player, &lines.join("\n"));
        Ok(())
    }

    pub fn delete_home(&mut self, player: PlayerId, name: Option<&str>) -> Result<(), Warning> {
        let id = self
            .homes
            .find(player, name)
            .map(Home::id)
            .ok_or_else(|| {
                Warning::new(match name {
                    None => "Your primary home is not set".to_string(),
                    Some(name) => format!("You do not have a home named \"{name}\""),
                })
            })?;

        self.store.delete_home(id);
        self.homes.remove(id);

        match name {
            None => self.tell(player, "Your primary home was unset"),
            Some(name) => self.tell(player, &format!("Home \"{name}\" deleted")),
        }
        self.emit(PluginEvent::DeleteHome {
            player,
            name: name.map(String::from),
        });
        Ok(())
    }

    // -- Invites ---------------------------------------------------------------

    /// The homes of other players this player may use, as `owner:name`.
    pub fn list_invites(&self, player: PlayerId) -> Result<(), Warning> {
        let entries: Vec<String> = self
            .homes
            .invited_to(player)
            .iter()
            .map(|home| home.qualified_name())
            .collect();
        self.tell(player, &format!("Your invites: {}", entries.join(", ")));
        Ok(())
    }

    pub fn invite(
        &mut self,
        player: &PlayerView,
        target_name: &str,
        home_name: Option<&str>,
    ) -> Result<(), Warning> {
        let target = self
            .platform
            .player_id_for_name(target_name)
            .ok_or_else(|| Warning::new(format!("Player not found: {target_name}")))?;
        if target == player.id {
            return Err(Warning::new("You cannot invite yourself!"));
        }
        let id = self
            .homes
            .find(player.id, home_name)
            .map(Home::id)
            .ok_or_else(|| {
                Warning::new(match home_name {
                    None => "Your primary home is not set".to_string(),
                    Some(name) => format!("You have no home named {name}"),
                })
            })?;

        if matches!(self.homes.invite(id, target), Ok(true)) {
            self.store.save_invite(HomeInvite {
                home: id,
                invitee: target,
            });
        }
        self.tell(player.id, &format!("Invite sent to {target_name}"));

        if self.platform.is_online(target) {
            let note = match home_name {
                None => format!(
                    "{0} invited you to their primary home. Use it with /home {0}:",
                    player.name
                ),
                Some(name) => format!(
                    "{0} invited you to their home {1}. Use it with /home {0}:{1}",
                    player.name, name
                ),
            };
            self.tell(target, &note);
        }
        self.emit(PluginEvent::InviteHome {
            player: player.id,
            target,
            name: home_name.map(String::from),
        });
        Ok(())
    }

    pub fn uninvite(
        &mut self,
        player: PlayerId,
        target_name: &str,
        home_name: Option<&str>,
    ) -> Result<(), Warning> {
        let target = self
            .platform
            .player_id_for_name(target_name)
            .ok_or_else(|| Warning::new(format!("Player not found: {target_name}!")))?;
        let id = self
            .homes
            .find(player, home_name)
            .map(Home::id)
            .ok_or_else(|| {
                Warning::new(match home_name {
                    None => "Default home not set.".to_string(),
                    Some(name) => format!("Home not found: {name}!"),
                })
            })?;

        self.homes
            .uninvite(id, target)
            .map_err(|_| Warning::new("Player not invited."))?;
        self.store.delete_invite(HomeInvite {
            home: id,
            invitee: target,
        });

        self.tell(player, &format!("{target_name} was uninvited"));
        self.emit(PluginEvent::UninviteHome {
            player,
            target,
            name: home_name.map(String::from),
        });
        Ok(())
    }

    // -- Public homes ----------------------------------------------------------

    /// Publishes a home so anyone can `/visit` it. A named home defaults
    /// to its own name as alias; the primary home needs one.
    pub fn make_public(
        &mut self,
        player: PlayerId,
        home_name: Option<&str>,
        alias: Option<&str>,
    ) -> Result<(), Warning> {
        let not_found = || {
            Warning::new(match home_name {
                None => "Your primary home is not set".to_string(),
                Some(name) => format!("Home not found: {name}"),
            })
        };
        let id = self
            .homes
            .find(player, home_name)
            .map(Home::id)
            .ok_or_else(not_found)?;

        let alias = self.homes.make_public(id, alias).map_err(|e| match e {
            HomeError::AlreadyPublic(current) => {
                Warning::new(format!("Home is already public under the alias \"{current}\""))
            }
            HomeError::MissingPublicName => Warning::new("Please supply a public name for this home"),
            HomeError::PublicNameTaken(_) => Warning::new(
                "A public home by that name already exists. Please supply a different alias.",
            ),
            _ => not_found(),
        })?;
        if let Some(home) = self.homes.get(id) {
            self.store.save_public_name(home);
        }

        self.tell(
            player,
            &format!("Home made public. Players may visit via /visit {alias}"),
        );
        Ok(())
    }

    // -- Completions -----------------------------------------------------------

    /// Own named homes containing `arg`.
    pub fn complete_owned_homes(&self, player: PlayerId, arg: &str) -> Vec<String> {
        self.homes
            .find_owned(player)
            .into_iter()
            .filter_map(Home::name)
            .filter(|name| name.contains(arg))
            .map(String::from)
            .collect()
    }

    /// Own named homes that are not public yet, containing `arg`.
    pub fn complete_publicable_homes(&self, player: PlayerId, arg: &str) -> Vec<String> {
        self.homes
            .find_owned(player)
            .into_iter()
            .filter(|home| home.public_name().is_none())
            .filter_map(Home::name)
            .filter(|name| name.contains(arg))
            .map(String::from)
            .collect()
    }

    /// Public aliases starting with `arg`.
    pub fn complete_public_homes(&self, arg: &str) -> Vec<String> {
        let mut aliases: Vec<String> = self
            .homes
            .iter()
            .filter_map(Home::public_name)
            .filter(|alias| alias.starts_with(arg))
            .map(String::from)
            .collect();
        aliases.sort();
        aliases
    }

    /// Everything `/home` accepts: own named homes, plus `owner:` and
    /// `owner:name` for homes the player is invited to (or all homes,
    /// when ignoring claims).
    pub fn complete_usable_homes(&self, player: PlayerId, arg: &str) -> Vec<String> {
        let ignore = self.ignores_claims(player);
        let mut own = Vec::new();
        let mut others = Vec::new();
        for home in self.homes.iter() {
            if home.is_owner(player) {
                if let Some(name) = home.name() {
                    if name.starts_with(arg) {
                        own.push(name.to_string());
                    }
                }
            } else if ignore || home.is_invited(player) {
                let qualified = home.qualified_name();
                if qualified.starts_with(arg) {
                    others.push(qualified);
                }
            }
        }
        own.sort();
        others.sort();
        own.extend(others);
        own
    }
}
