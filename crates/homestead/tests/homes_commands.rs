//! Integration tests for the `/homes` command family.

mod common;

use common::*;
use homestead::prelude::*;

fn warning(result: Result<(), Warning>) -> String {
    result.unwrap_err().message().to_string()
}

// =========================================================================
// set
// =========================================================================

#[test]
fn test_set_home_primary_creates_and_writes_through() {
    let mut hs = homestead();

    hs.set_home(&steve_at(10.5, 10.5), None).unwrap();

    let home = hs.homes().find(STEVE, None).unwrap();
    assert_eq!(home.owner_name(), "Steve");
    assert_eq!(hs.store().writes(), vec![Write::Insert(home.id())]);
    assert_eq!(hs.platform().messages_to(STEVE), vec!["Primary home set"]);
    assert_eq!(
        hs.platform().events(),
        vec![PluginEvent::SetPrimaryHome { player: STEVE }]
    );
}

#[test]
fn test_set_home_again_moves_existing_home() {
    let mut hs = homestead();
    hs.set_home(&steve_at(10.5, 10.5), None).unwrap();
    hs.set_home(&steve_at(20.5, 10.5), None).unwrap();

    assert_eq!(hs.homes().len(), 1);
    let home = hs.homes().find(STEVE, None).unwrap();
    assert_eq!(home.x(), 20.5);
    assert_eq!(hs.store().writes()[1], Write::Update(home.id()));
}

#[test]
fn test_set_home_named_near_primary_is_refused() {
    let mut hs = homestead();
    hs.set_home(&steve_at(0.5, 0.5), None).unwrap();

    let err = warning(hs.set_home(&steve_at(30.5, -20.5), Some("base")));
    assert_eq!(err, "Your primary home is nearby");
    assert!(hs.homes().find(STEVE, Some("base")).is_none());
}

#[test]
fn test_set_home_near_named_home_names_it() {
    let mut hs = homestead();
    hs.set_home(&steve_at(0.5, 0.5), Some("base")).unwrap();

    let err = warning(hs.set_home(&steve_at(10.5, 0.5), Some("farm")));
    assert_eq!(err, "You have a home named \"base\" nearby");
}

#[test]
fn test_set_home_far_enough_is_accepted() {
    let mut hs = homestead();
    hs.set_home(&steve_at(0.5, 0.5), None).unwrap();
    hs.set_home(&steve_at(64.5, 0.5), Some("base")).unwrap();

    assert_eq!(hs.homes().len(), 2);
    assert!(hs.platform().messages_to(STEVE).contains(&"Home \"base\" set".to_string()));
    assert!(hs.platform().events().contains(&PluginEvent::SetNamedHome {
        player: STEVE,
        name: "base".into(),
    }));
}

#[test]
fn test_set_home_margin_uses_block_coordinates() {
    let mut hs = homestead();
    hs.set_home(&steve_at(63.5, 0.5), None).unwrap();

    // Block -1 is 64 blocks from block 63, exactly the margin.
    hs.set_home(&steve_at(-0.5, 0.5), Some("base")).unwrap();
    assert!(hs.homes().find(STEVE, Some("base")).is_some());

    let err = warning(hs.set_home(&steve_at(-0.5, 0.5), Some("farm")));
    assert_eq!(err, "You have a home named \"base\" nearby");
}

#[test]
fn test_set_home_other_players_homes_do_not_count_as_nearby() {
    let mut hs = homestead();
    hs.set_home(&alex_at(0.5, 0.5), None).unwrap();
    hs.set_home(&steve_at(1.5, 1.5), None).unwrap();
    assert_eq!(hs.homes().len(), 2);
}

#[test]
fn test_set_home_outside_home_worlds_is_refused() {
    let mut hs = homestead();
    let nether = PlayerView::new(STEVE, "Steve", at("nether", 0.0, 0.0));
    let mining = PlayerView::new(STEVE, "Steve", at("mining", 0.0, 0.0));

    assert_eq!(warning(hs.set_home(&nether, None)), "You cannot set homes in this world");
    // Home world, but hosted by another server.
    assert_eq!(warning(hs.set_home(&mining, None)), "You cannot set homes in this world");
    assert!(hs.homes().is_empty());
}

#[test]
fn test_set_home_in_foreign_claim_is_refused_until_trusted() {
    let mut hs = homestead();
    let claim = add_claim(&mut hs, ALEX, "Alex", (0, 0, 99, 99));

    let err = warning(hs.set_home(&steve_at(50.5, 50.5), None));
    assert_eq!(err, "You cannot set homes in this claim");

    hs.claims_mut()
        .get_mut(claim)
        .unwrap()
        .set_trust(STEVE, TrustType::Build);
    hs.set_home(&steve_at(50.5, 50.5), None).unwrap();
}

#[test]
fn test_set_home_ignore_claims_bypasses_claim_check() {
    let mut hs = homestead();
    add_claim(&mut hs, ALEX, "Alex", (0, 0, 99, 99));
    hs.set_ignore_claims(STEVE, true);

    hs.set_home(&steve_at(50.5, 50.5), None).unwrap();
}

// =========================================================================
// list / page
// =========================================================================

#[test]
fn test_list_homes_empty_warns() {
    let mut hs = homestead();
    assert_eq!(warning(hs.list_homes(STEVE)), "No homes to show");
    assert!(hs.platform().events().is_empty());
}

#[test]
fn test_list_homes_single_page() {
    let mut hs = homestead();
    hs.set_home(&steve_at(0.5, 0.5), None).unwrap();
    hs.set_home(&steve_at(500.5, 0.5), Some("base")).unwrap();
    hs.platform().clear();

    hs.list_homes(STEVE).unwrap();

    assert_eq!(
        hs.platform().messages_to(STEVE),
        vec!["You have 2 homes", " + Primary\n + base"]
    );
    assert_eq!(
        hs.platform().events(),
        vec![PluginEvent::ListHomes {
            player: STEVE,
            count: 2
        }]
    );
}

#[test]
fn test_list_homes_one_home_header() {
    let mut hs = homestead();
    hs.set_home(&steve_at(0.5, 0.5), None).unwrap();
    hs.platform().clear();

    hs.list_homes(STEVE).unwrap();
    assert_eq!(hs.platform().messages_to(STEVE)[0], "You have one home");
}

#[test]
fn test_list_homes_paginates_and_page_command_shows_rest() {
    let mut hs = homestead();
    for i in 0..12 {
        let name = format!("h{i:02}");
        hs.set_home(&steve_at(i as f64 * 100.0, 0.5), Some(name.as_str())).unwrap();
    }
    hs.platform().clear();

    hs.list_homes(STEVE).unwrap();
    let messages = hs.platform().messages_to(STEVE);
    assert_eq!(messages[0], "You have 12 homes");
    assert_eq!(messages[1].lines().count(), 9);
    assert!(messages[1].starts_with(" + h00"));
    assert_eq!(messages[2], "Showing page 1/2 (/homes page 2 for more)");
    assert_eq!(hs.session(STEVE).unwrap().page_count(), 2);

    hs.platform().clear();
    hs.show_page(STEVE, "2").unwrap();
    assert_eq!(
        hs.platform().messages_to(STEVE),
        vec![" + h09\n + h10\n + h11"]
    );
}

#[test]
fn test_show_page_bad_input() {
    let hs = homestead();
    assert_eq!(warning(hs.show_page(STEVE, "abc")), "Not a number: abc");
    assert_eq!(warning(hs.show_page(STEVE, "1")), "Page does not exist: 1");
    assert_eq!(warning(hs.show_page(STEVE, "0")), "Page does not exist: 0");
    assert_eq!(warning(hs.show_page(STEVE, "-3")), "Page does not exist: -3");
}

// =========================================================================
// info
// =========================================================================

#[test]
fn test_home_info_reports_location_invites_and_visibility() {
    let mut hs = homestead();
    load_home(
        &mut hs,
        1,
        STEVE,
        "Steve",
        None,
        Location::new("home", 10.7, 64.0, -3.2),
    );
    hs.invite(&steve_at(0.0, 0.0), "Alex", None).unwrap();
    hs.platform().clear();

    hs.home_info(STEVE, None).unwrap();

    assert_eq!(
        hs.platform().messages_to(STEVE),
        vec!["Primary Home Info\n Location: Home 10,64,-4\n Invited: 1 Alex\n Public: no"]
    );
}

#[test]
fn test_home_info_named_header_and_missing_home() {
    let mut hs = homestead();
    load_home(&mut hs, 1, STEVE, "Steve", Some("base"), at("home", 0.0, 0.0));

    hs.home_info(STEVE, Some("base")).unwrap();
    assert!(hs.platform().messages_to(STEVE)[0].starts_with("base Info\n"));

    assert_eq!(warning(hs.home_info(STEVE, Some("farm"))), "Home not found.");
    assert_eq!(warning(hs.home_info(STEVE, None)), "Home not found.");
}

// =========================================================================
// invite / uninvite / invites
// =========================================================================

#[test]
fn test_invite_rejections() {
    let mut hs = homestead();
    let steve = steve_at(0.0, 0.0);

    assert_eq!(warning(hs.invite(&steve, "Notch", None)), "Player not found: Notch");
    assert_eq!(warning(hs.invite(&steve, "Steve", None)), "You cannot invite yourself!");
    assert_eq!(warning(hs.invite(&steve, "Alex", None)), "Your primary home is not set");
    assert_eq!(
        warning(hs.invite(&steve, "Alex", Some("base"))),
        "You have no home named base"
    );
    assert!(hs.store().writes().is_empty());
}

#[test]
fn test_invite_notifies_online_target_and_saves_once() {
    let mut hs = homestead();
    let id = load_home(&mut hs, 1, STEVE, "Steve", Some("base"), at("home", 0.0, 0.0));
    let steve = steve_at(0.0, 0.0);

    hs.invite(&steve, "Alex", Some("base")).unwrap();
    hs.invite(&steve, "Alex", Some("base")).unwrap();

    let invite = HomeInvite {
        home: id,
        invitee: ALEX,
    };
    assert_eq!(hs.store().writes(), vec![Write::SaveInvite(invite)]);
    assert_eq!(hs.platform().messages_to(STEVE), vec!["Invite sent to Alex"; 2]);
    assert_eq!(
        hs.platform().messages_to(ALEX)[0],
        "Steve invited you to their home base. Use it with /home Steve:base"
    );
    assert!(hs.platform().events().contains(&PluginEvent::InviteHome {
        player: STEVE,
        target: ALEX,
        name: Some("base".into()),
    }));
}

#[test]
fn test_invite_offline_target_gets_no_message() {
    let mut hs = homestead();
    load_home(&mut hs, 1, STEVE, "Steve", None, at("home", 0.0, 0.0));

    hs.invite(&steve_at(0.0, 0.0), "Herobrine", None).unwrap();

    assert!(hs.platform().messages_to(HEROBRINE).is_empty());
    assert!(hs.homes().find(STEVE, None).unwrap().is_invited(HEROBRINE));
}

#[test]
fn test_list_invites_shows_qualified_names() {
    let mut hs = homestead();
    load_home(&mut hs, 1, STEVE, "Steve", Some("base"), at("home", 0.0, 0.0));
    load_home(&mut hs, 2, HEROBRINE, "Herobrine", None, at("home", 500.0, 0.0));
    hs.invite(&steve_at(0.0, 0.0), "Alex", Some("base")).unwrap();
    let herobrine = PlayerView::new(HEROBRINE, "Herobrine", at("home", 0.0, 0.0));
    hs.invite(&herobrine, "Alex", None).unwrap();
    hs.platform().clear();

    hs.list_invites(ALEX).unwrap();
    assert_eq!(
        hs.platform().messages_to(ALEX),
        vec!["Your invites: Steve:base, Herobrine:"]
    );
}

#[test]
fn test_uninvite_flow() {
    let mut hs = homestead();
    let id = load_home(&mut hs, 1, STEVE, "Steve", Some("base"), at("home", 0.0, 0.0));

    assert_eq!(
        warning(hs.uninvite(STEVE, "Alex", Some("base"))),
        "Player not invited."
    );

    hs.invite(&steve_at(0.0, 0.0), "Alex", Some("base")).unwrap();
    hs.uninvite(STEVE, "Alex", Some("base")).unwrap();

    assert!(!hs.homes().get(id).unwrap().is_invited(ALEX));
    assert_eq!(
        hs.store().writes().last(),
        Some(&Write::DeleteInvite(HomeInvite {
            home: id,
            invitee: ALEX
        }))
    );
    assert_eq!(hs.platform().messages_to(STEVE).last().unwrap(), "Alex was uninvited");
    assert!(hs.platform().events().contains(&PluginEvent::UninviteHome {
        player: STEVE,
        target: ALEX,
        name: Some("base".into()),
    }));

    assert_eq!(
        warning(hs.uninvite(STEVE, "Alex", Some("base"))),
        "Player not invited."
    );
}

#[test]
fn test_uninvite_rejections() {
    let mut hs = homestead();
    assert_eq!(warning(hs.uninvite(STEVE, "Notch", None)), "Player not found: Notch!");
    assert_eq!(warning(hs.uninvite(STEVE, "Alex", None)), "Default home not set.");
    assert_eq!(warning(hs.uninvite(STEVE, "Alex", Some("base"))), "Home not found: base!");
}

// =========================================================================
// public / visit listing
// =========================================================================

#[test]
fn test_make_public_uses_home_name_as_default_alias() {
    let mut hs = homestead();
    let id = load_home(&mut hs, 1, STEVE, "Steve", Some("base"), at("home", 0.0, 0.0));

    hs.make_public(STEVE, Some("base"), None).unwrap();

    assert_eq!(hs.homes().find_public("base").unwrap().id(), id);
    assert_eq!(hs.store().writes(), vec![Write::PublicName(id, "base".into())]);
    assert_eq!(
        hs.platform().messages_to(STEVE),
        vec!["Home made public. Players may visit via /visit base"]
    );
}

#[test]
fn test_make_public_rejections() {
    let mut hs = homestead();
    load_home(&mut hs, 1, STEVE, "Steve", Some("base"), at("home", 0.0, 0.0));
    load_home(&mut hs, 2, STEVE, "Steve", None, at("home", 500.0, 0.0));
    load_home(&mut hs, 3, ALEX, "Alex", Some("tower"), at("home", 900.0, 0.0));

    assert_eq!(warning(hs.make_public(STEVE, Some("castle"), None)), "Home not found: castle");
    assert_eq!(
        warning(hs.make_public(STEVE, None, None)),
        "Please supply a public name for this home"
    );

    hs.make_public(ALEX, Some("tower"), Some("spire")).unwrap();
    assert_eq!(
        warning(hs.make_public(STEVE, Some("base"), Some("spire"))),
        "A public home by that name already exists. Please supply a different alias."
    );
    assert!(hs.homes().find(STEVE, Some("base")).unwrap().public_name().is_none());

    hs.make_public(STEVE, Some("base"), Some("myhouse")).unwrap();
    assert_eq!(
        warning(hs.make_public(STEVE, Some("base"), Some("other"))),
        "Home is already public under the alias \"myhouse\""
    );
}

#[test]
fn test_list_public_homes() {
    let mut hs = homestead();
    assert_eq!(warning(hs.list_public_homes(ALEX)), "No public homes to show");

    load_home(&mut hs, 1, STEVE, "Steve", Some("base"), at("home", 0.0, 0.0));
    hs.make_public(STEVE, Some("base"), Some("myhouse")).unwrap();
    hs.platform().clear();

    hs.list_public_homes(ALEX).unwrap();
    assert_eq!(
        hs.platform().messages_to(ALEX),
        vec!["One public home", " + myhouse by Steve"]
    );
    assert_eq!(
        hs.platform().events(),
        vec![PluginEvent::ViewPublicHomes { player: ALEX }]
    );
}

// =========================================================================
// delete
// =========================================================================

#[test]
fn test_delete_home_named_and_primary() {
    let mut hs = homestead();
    let base = load_home(&mut hs, 1, STEVE, "Steve", Some("base"), at("home", 0.0, 0.0));
    let primary = load_home(&mut hs, 2, STEVE, "Steve", None, at("home", 500.0, 0.0));

    hs.delete_home(STEVE, Some("base")).unwrap();
    hs.delete_home(STEVE, None).unwrap();

    assert!(hs.homes().is_empty());
    assert_eq!(
        hs.store().writes(),
        vec![Write::Delete(base), Write::Delete(primary)]
    );
    assert_eq!(
        hs.platform().messages_to(STEVE),
        vec!["Home \"base\" deleted", "Your primary home was unset"]
    );
    assert!(hs.platform().events().contains(&PluginEvent::DeleteHome {
        player: STEVE,
        name: None,
    }));
}

#[test]
fn test_delete_home_missing() {
    let mut hs = homestead();
    assert_eq!(warning(hs.delete_home(STEVE, None)), "Your primary home is not set");
    assert_eq!(
        warning(hs.delete_home(STEVE, Some("base"))),
        "You do not have a home named \"base\""
    );
}

// =========================================================================
// completions
// =========================================================================

#[test]
fn test_completions() {
    let mut hs = homestead();
    load_home(&mut hs, 1, STEVE, "Steve", Some("base"), at("home", 0.0, 0.0));
    load_home(&mut hs, 2, STEVE, "Steve", Some("farm"), at("home", 500.0, 0.0));
    load_home(&mut hs, 3, STEVE, "Steve", None, at("home", 900.0, 0.0));
    load_home(&mut hs, 4, ALEX, "Alex", Some("bakery"), at("home", 1500.0, 0.0));
    hs.make_public(STEVE, Some("farm"), None).unwrap();
    hs.make_public(ALEX, Some("bakery"), None).unwrap();
    hs.invite(&steve_at(0.0, 0.0), "Alex", Some("base")).unwrap();

    assert_eq!(hs.complete_owned_homes(STEVE, "a"), vec!["base", "farm"]);
    assert_eq!(hs.complete_publicable_homes(STEVE, ""), vec!["base"]);
    assert_eq!(hs.complete_public_homes("ba"), vec!["bakery"]);
    assert_eq!(hs.complete_usable_homes(ALEX, ""), vec!["bakery", "Steve:base"]);
    assert_eq!(hs.complete_usable_homes(ALEX, "Steve:f"), Vec::<String>::new());

    hs.set_ignore_claims(ALEX, true);
    assert_eq!(
        hs.complete_usable_homes(ALEX, "Steve:"),
        vec!["Steve:", "Steve:base", "Steve:farm"]
    );
}

// =========================================================================
// lifecycle
// =========================================================================

#[test]
fn test_player_joined_twice_is_an_error() {
    let mut hs = homestead();
    let err = hs.player_joined(STEVE).unwrap_err();
    assert!(matches!(err, HomesteadError::Session(_)));

    hs.player_left(STEVE).unwrap();
    assert!(hs.session(STEVE).is_none());
    assert!(matches!(hs.player_left(STEVE), Err(HomesteadError::Session(_))));
}
